//! Date labels and the 24 solar terms.

use chrono::{Datelike, NaiveDate};

const WEEKDAYS: [&str; 7] = [
    "星期一", "星期二", "星期三", "星期四", "星期五", "星期六", "星期日",
];

/// `(month, first day, label)`; a term also covers the following day.
const SOLAR_TERMS: [(u32, u32, &str); 24] = [
    (1, 5, "小寒 (天氣冷颼颼的，小雲只想跟暖爐當好朋友 🔥)"),
    (1, 20, "大寒 (一年中最冷的時候！小雲也要多蓋一層小被被！🥶)"),
    (2, 4, "立春 (春天悄悄來了喵～花苞好像偷偷睜開眼睛了 🌸)"),
    (2, 19, "雨水 (小雨滴答滴答，像在唱歌給小雲聽 🌧️)"),
    (3, 5, "驚蟄 (小雲好像聽到遠方的小蟲蟲在伸懶腰 🐞)"),
    (3, 20, "春分 (白天跟黑夜一樣長耶！🌗)"),
    (4, 4, "清明 (暖呼呼的，最適合在窗邊把自己曬成一條貓貓蟲 ☀️)"),
    (4, 20, "穀雨 (雨水幫小種子快快長大 🌱)"),
    (5, 5, "立夏 (夏天要來了喵！冰涼的地板是小雲的新寶座 🧊)"),
    (5, 21, "小滿 (田裡的小麥好像吃飽飽變胖胖了 🌾)"),
    (6, 5, "芒種 (農夫們好忙喔！小雲在旁邊打呼嚕加油 😴)"),
    (6, 21, "夏至 (一年中白天最長的一天！☀️)"),
    (7, 7, "小暑 (天氣變熱熱了，小雲攤成一塊貓餅散熱 ♨️)"),
    (7, 22, "大暑 (一年中最熱的時候！除非有冰棒，不然誰都不要找我 🍦)"),
    (8, 7, "立秋 (葉子好像要開始變魔術了 🍂)"),
    (8, 23, "處暑 (暑氣慢慢消退，晚上涼快一點了～)"),
    (9, 7, "白露 (小草上有亮晶晶的露珠，像小珍珠 ✨)"),
    (9, 23, "秋分 (白天和黑夜又一樣長了 🌕)"),
    (10, 8, "寒露 (小雲要開始找暖暖的被被了～)"),
    (10, 23, "霜降 (白白的霜像糖粉一樣，可以吃嗎？🤔❄️)"),
    (11, 7, "立冬 (小雲的毛好像變得更蓬鬆了 🧤)"),
    (11, 22, "小雪 (可能會下小小的雪花耶！☃️)"),
    (12, 7, "大雪 (世界會不會變成白色的棉花糖？🌨️)"),
    (12, 21, "冬至 (夜晚最長，最適合躲在被窩裡聽故事 🌙)"),
];

pub const NO_SOLAR_TERM: &str =
    "一個神秘又美好的日子 (小雲覺得今天空氣裡有香香甜甜的味道！可能會發生很棒的事喔～✨)";

/// `2024年10月27日 星期日`
pub fn date_label(date: NaiveDate) -> String {
    format!(
        "{} {}",
        date.format("%Y年%m月%d日"),
        WEEKDAYS[date.weekday().num_days_from_monday() as usize]
    )
}

/// Solar-term label for `date`, or the generic fallback.
pub fn solar_term(date: NaiveDate) -> &'static str {
    SOLAR_TERMS
        .iter()
        .find(|(month, start, _)| date.month() == *month && (*start..=*start + 1).contains(&date.day()))
        .map(|(_, _, label)| *label)
        .unwrap_or(NO_SOLAR_TERM)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_label_uses_chinese_weekday() {
        assert_eq!(date_label(date(2024, 10, 27)), "2024年10月27日 星期日");
        assert_eq!(date_label(date(2024, 1, 1)), "2024年01月01日 星期一");
    }

    #[test]
    fn test_solar_term_matches_start_and_next_day() {
        assert!(solar_term(date(2024, 10, 23)).starts_with("霜降"));
        assert!(solar_term(date(2024, 10, 24)).starts_with("霜降"));
        assert_eq!(solar_term(date(2024, 10, 25)), NO_SOLAR_TERM);
    }

    #[test]
    fn test_solar_term_fallback_when_no_entry() {
        assert_eq!(solar_term(date(2024, 3, 1)), NO_SOLAR_TERM);
    }

    #[test]
    fn test_table_is_sorted_and_complete() {
        assert_eq!(SOLAR_TERMS.len(), 24);
        for pair in SOLAR_TERMS.windows(2) {
            assert!((pair[0].0, pair[0].1) < (pair[1].0, pair[1].1));
        }
    }
}
