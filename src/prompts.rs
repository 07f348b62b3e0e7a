use crate::fortunes::FortunePicks;
use crate::models::DailyContext;

pub const DAILY_MESSAGE: &str = include_str!("../data/prompts/daily_message.txt");
pub const IMAGE_RELEVANCE: &str = include_str!("../data/prompts/image_relevance.txt");

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Build the daily-message instruction from today's context and fortunes.
pub fn daily_instruction(context: &DailyContext, picks: &FortunePicks) -> String {
    let solar_term_name = context
        .solar_term
        .split(" (")
        .next()
        .unwrap_or(&context.solar_term);

    render(
        DAILY_MESSAGE,
        &[
            ("date", &context.date_label),
            ("weather_description", &context.weather.description),
            ("temperature", &context.weather.temperature),
            ("weather_reaction", &context.weather.reaction),
            ("solar_term", &context.solar_term),
            ("solar_term_name", solar_term_name),
            ("luck_good", &picks.luck_good),
            ("luck_bad", &picks.luck_bad),
            ("cat_do", &picks.cat_do),
            ("cat_dont", &picks.cat_dont),
            ("philosophy", &picks.philosophy),
        ],
    )
}

/// Instruction for the vision-relevance check.
pub fn image_relevance(theme: &str) -> String {
    render(IMAGE_RELEVANCE, &[("theme", theme)])
}
