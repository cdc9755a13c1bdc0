//! The disease finder: turns remote analysis into chat replies, and falls
//! back to canned local advice whenever the remote side fails.

use crate::remote::plant_id::HealthResponse;
use crate::remote::{ChatCompleter, DiseaseDetector};

pub const GREETING: &str = "Hello! I'm your AI plant disease assistant. Upload a photo of your plant \
or describe symptoms, and I'll help diagnose diseases and provide care advice.";

const IMAGE_FALLBACK: &str = "I'm having trouble analyzing the image right now. Could you describe \
the symptoms you're seeing? I can still help diagnose the issue based on your description.";

const NO_ASSESSMENT: &str = "I couldn't detect any specific diseases in this image. The plant \
appears healthy, but if you're concerned about specific symptoms, please describe them and I'll \
help you further.";

const HEALTHY: &str = "Good news! I don't detect any diseases in your plant. It appears to be \
healthy. Continue with regular care and monitoring.";

const MAX_DISEASES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// The remote call failed and `text` is local advice.
    pub fallback: bool,
    /// Why the remote call failed, for the internal log.
    pub error: Option<String>,
}

impl Reply {
    fn remote(text: String) -> Self {
        Self {
            text,
            fallback: false,
            error: None,
        }
    }

    fn fallback(text: &str, error: String) -> Self {
        Self {
            text: text.to_string(),
            fallback: true,
            error: Some(error),
        }
    }
}

pub fn format_disease_results(result: &HealthResponse) -> String {
    let Some(assessment) = &result.health_assessment else {
        return NO_ASSESSMENT.to_string();
    };

    if assessment.diseases.is_empty() {
        return HEALTHY.to_string();
    }

    let mut out = String::from("🔍 **Disease Analysis Results:**\n\n");

    for (i, disease) in assessment.diseases.iter().take(MAX_DISEASES).enumerate() {
        let pct = (disease.probability * 100.0).round() as i64;
        out.push_str(&format!("**{}. {}** ({}% confidence)\n", i + 1, disease.name, pct));

        if let Some(details) = &disease.disease_details {
            if let Some(desc) = &details.description {
                out.push_str(&format!("📋 Description: {}\n", desc));
            }
            if let Some(bio) = details.treatment.as_ref().and_then(|t| t.biological.as_ref()) {
                out.push_str(&format!("💊 Treatment: {}\n", bio.join(", ")));
            }
        }
        out.push('\n');
    }

    out.push_str("💡 **General Recommendations:**\n");
    out.push_str("• Remove affected leaves immediately\n");
    out.push_str("• Improve air circulation around the plant\n");
    out.push_str("• Avoid watering leaves directly\n");
    out.push_str("• Monitor plant closely for changes\n");

    out
}

/// Keyword-matched advice used when the chat endpoint is unavailable.
pub fn fallback_response(input: &str) -> &'static str {
    let input = input.to_lowercase();

    if input.contains("water") {
        "💧 **Watering Tips:**\n• Check soil moisture with your finger\n• Water when top inch is dry\n\
         • Ensure good drainage\n• Water in the morning\n\
         • Avoid overwatering - it's the #1 cause of plant problems!"
    } else if input.contains("yellow") {
        "🍃 **Yellow Leaves:**\n• Often caused by overwatering\n• Could be natural aging (lower leaves)\n\
         • Check for pests\n• Ensure adequate light\n• Consider nutrient deficiency"
    } else if input.contains("brown") || input.contains("spot") {
        "🟤 **Brown Spots/Leaves:**\n• May indicate fungal disease\n• Remove affected leaves\n\
         • Improve air circulation\n• Avoid getting leaves wet\n• Consider fungicide treatment"
    } else if input.contains("pest") || input.contains("bug") {
        "🐛 **Pest Control:**\n• Inspect leaves regularly\n• Use neem oil for treatment\n\
         • Isolate affected plants\n• Increase humidity for spider mites\n• Consider beneficial insects"
    } else {
        "🌱 I'd be happy to help with your plant care question! For the most accurate advice, \
         could you provide more specific details about the symptoms you're observing? \
         You can also upload a photo for visual analysis."
    }
}

pub fn diagnose<D: DiseaseDetector + ?Sized>(detector: &D, image: &[u8]) -> Reply {
    match detector.assess_health(image) {
        Ok(result) => Reply::remote(format_disease_results(&result)),
        Err(e) => Reply::fallback(IMAGE_FALLBACK, e.to_string()),
    }
}

pub fn ask<C: ChatCompleter + ?Sized>(chat: &C, question: &str) -> Reply {
    match chat.complete(question) {
        Ok(answer) => Reply::remote(answer),
        Err(e) => Reply::fallback(fallback_response(question), e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, AppResult};
    use crate::remote::plant_id::{Disease, DiseaseDetails, HealthAssessment, Treatment};

    struct Failing;

    impl DiseaseDetector for Failing {
        fn assess_health(&self, _image: &[u8]) -> AppResult<HealthResponse> {
            Err(AppError::Remote("503".into()))
        }
    }

    impl ChatCompleter for Failing {
        fn complete(&self, _msg: &str) -> AppResult<String> {
            Err(AppError::Remote("timeout".into()))
        }
    }

    struct Fixed(HealthResponse);

    impl DiseaseDetector for Fixed {
        fn assess_health(&self, _image: &[u8]) -> AppResult<HealthResponse> {
            Ok(self.0.clone())
        }
    }

    struct Echo;

    impl ChatCompleter for Echo {
        fn complete(&self, msg: &str) -> AppResult<String> {
            Ok(format!("answer to: {}", msg))
        }
    }

    fn disease(name: &str, p: f64) -> Disease {
        Disease {
            name: name.into(),
            probability: p,
            disease_details: None,
        }
    }

    #[test]
    fn reports_at_most_three_diseases_with_details() {
        let mut first = disease("Powdery mildew", 0.876);
        first.disease_details = Some(DiseaseDetails {
            description: Some("White fungal growth.".into()),
            treatment: Some(Treatment {
                biological: Some(vec!["Neem oil".into(), "Baking soda spray".into()]),
            }),
        });

        let resp = HealthResponse {
            health_assessment: Some(HealthAssessment {
                diseases: vec![
                    first,
                    disease("Leaf spot", 0.4),
                    disease("Root rot", 0.2),
                    disease("Rust", 0.1),
                ],
            }),
        };

        let text = format_disease_results(&resp);
        assert!(text.contains("**1. Powdery mildew** (88% confidence)"));
        assert!(text.contains("📋 Description: White fungal growth."));
        assert!(text.contains("💊 Treatment: Neem oil, Baking soda spray"));
        assert!(text.contains("**3. Root rot** (20% confidence)"));
        assert!(!text.contains("Rust"));
        assert!(text.contains("General Recommendations"));
    }

    #[test]
    fn healthy_and_missing_assessment_messages() {
        let healthy = HealthResponse {
            health_assessment: Some(HealthAssessment { diseases: vec![] }),
        };
        assert!(format_disease_results(&healthy).starts_with("Good news!"));
        let missing = format_disease_results(&HealthResponse::default());
        assert!(missing.starts_with("I couldn't detect"));
    }

    #[test]
    fn remote_failures_produce_fallback_replies() {
        let r = diagnose(&Failing, b"img");
        assert!(r.fallback);
        assert!(r.text.starts_with("I'm having trouble analyzing"));

        let r = ask(&Failing, "Why are my leaves YELLOW?");
        assert!(r.fallback);
        assert!(r.text.contains("Yellow Leaves"));
        assert_eq!(r.error.as_deref(), Some("Remote service error: timeout"));
    }

    #[test]
    fn successful_calls_pass_through() {
        let r = ask(&Echo, "hello");
        assert!(!r.fallback);
        assert_eq!(r.text, "answer to: hello");

        let r = diagnose(&Fixed(HealthResponse::default()), b"img");
        assert!(!r.fallback);
    }

    #[test]
    fn fallback_keywords_in_priority_order() {
        assert!(fallback_response("how often to water?").contains("Watering Tips"));
        assert!(fallback_response("brown spots").contains("Brown Spots"));
        assert!(fallback_response("tiny bugs").contains("Pest Control"));
        assert!(fallback_response("hello").starts_with("🌱"));
    }
}
