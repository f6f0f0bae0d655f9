use serde_json::Value;

pub const DICE_IDLE: &str = "🎲";
pub const WON_TEXT: &str = "You Won! 🎉";
pub const LOST_TEXT: &str = "You Lost 😢";
pub const PLAY_REJECTED: &str = "Please select a bet type and enter a valid bet amount";
pub const UNSUPPORTED: &str = "Your browser does not support WebSockets.";

/// Two-decimal dollar amount. Exact halfway values (only odd multiples of
/// 1/8 can be) round away from zero rather than to even.
pub fn format_balance(balance: f64) -> String {
    let eighths = balance * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        let rounded = (balance * 100.0).round() / 100.0;
        return format!("${rounded:.2}");
    }
    format!("${balance:.2}")
}

/// Renders whatever the server sent as the roll the way a template string
/// would: strings verbatim, everything else as JSON text.
pub fn format_dice(dice_result: &Value) -> String {
    match dice_result {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultBanner {
    #[default]
    Hidden,
    Won,
    Lost,
}

impl ResultBanner {
    pub fn from_won(won: bool) -> Self {
        if won {
            ResultBanner::Won
        } else {
            ResultBanner::Lost
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            ResultBanner::Hidden => "",
            ResultBanner::Won => WON_TEXT,
            ResultBanner::Lost => LOST_TEXT,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            ResultBanner::Hidden => "text-xl font-bold text-transparent",
            ResultBanner::Won => "text-xl font-bold text-green-400",
            ResultBanner::Lost => "text-xl font-bold text-red-400",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn balance_has_two_decimals() {
        assert_eq!(format_balance(0.0), "$0.00");
        assert_eq!(format_balance(100.0), "$100.00");
        assert_eq!(format_balance(12.5), "$12.50");
        assert_eq!(format_balance(7.34159), "$7.34");
        assert_eq!(format_balance(1234567.891), "$1234567.89");
        assert_eq!(format_balance(0.999), "$1.00");
    }

    #[test]
    fn balance_ties_round_up() {
        assert_eq!(format_balance(0.125), "$0.13");
        assert_eq!(format_balance(1000.625), "$1000.63");
        assert_eq!(format_balance(10.375), "$10.38");
        assert_eq!(format_balance(0.875), "$0.88");
        assert_eq!(format_balance(2.5), "$2.50");
        // not exactly halfway in binary
        assert_eq!(format_balance(1.005), "$1.00");
        assert_eq!(format_balance(0.615), "$0.61");
    }

    #[test]
    fn balance_always_two_decimals() {
        for cents in (0..100_000u64).step_by(37) {
            let text = format_balance(cents as f64 / 100.0);
            let (_, decimals) = text.split_once('.').unwrap();
            assert_eq!(decimals.len(), 2, "{text}");
            assert!(text.starts_with('$'));
        }
    }

    #[test]
    fn dice_rendering() {
        assert_eq!(format_dice(&json!(7)), "7");
        assert_eq!(format_dice(&json!("six")), "six");
        assert_eq!(format_dice(&json!([3, 4])), "[3,4]");
        assert_eq!(format_dice(&Value::Null), "null");
    }

    #[test]
    fn banners() {
        assert_eq!(ResultBanner::from_won(true).text(), WON_TEXT);
        assert_eq!(ResultBanner::from_won(false).class(), "text-xl font-bold text-red-400");
        assert_eq!(ResultBanner::default().text(), "");
    }
}
