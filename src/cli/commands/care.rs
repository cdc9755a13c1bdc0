use crate::core::care::{CATEGORIES, POPULAR_PLANTS, tip_of_the_day};
use crate::errors::AppResult;
use crate::ui::messages::header;
use crate::utils::colors::{GREY, RESET};
use crate::utils::date::today;
use crate::utils::formatting::{bold, pad_right};

pub fn handle() -> AppResult<()> {
    header("Plant care guides");
    for c in CATEGORIES {
        println!("{} {}", c.icon, bold(c.title));
        println!("   {GREY}{}{RESET}", c.description);
    }

    println!();
    header("Popular plants");
    for p in POPULAR_PLANTS {
        println!("🪴 {} {}", pad_right(p.name, 18), p.difficulty);
    }

    let tip = tip_of_the_day(today());
    println!();
    header("Tip of the day");
    println!("💡 {}", bold(tip.title));
    println!("   {}", tip.body);

    Ok(())
}
