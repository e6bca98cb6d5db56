#![forbid(unsafe_code)]

pub mod ids {
    /// Opaque platform user identifier.
    ///
    /// The transport hands these over as signed integers; the core never
    /// interprets them beyond equality and display.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct UserId(i64);

    impl UserId {
        pub fn new(value: i64) -> Self {
            Self(value)
        }

        pub fn as_i64(&self) -> i64 {
            self.0
        }
    }

    impl std::fmt::Display for UserId {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{}", self.0)
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum UserIdParseError {
        Empty,
        NotANumber,
    }

    /// Parse a referrer argument carried on a `start` command.
    ///
    /// Anything that is not a plain integer is rejected; callers are expected
    /// to drop the argument silently rather than surface the error.
    pub fn parse_user_id(value: &str) -> Result<UserId, UserIdParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(UserIdParseError::Empty);
        }
        trimmed
            .parse::<i64>()
            .map(UserId)
            .map_err(|_| UserIdParseError::NotANumber)
    }
}

pub mod quote {
    /// USD price of a single star.
    pub const PRICE_PER_STAR: f64 = 0.00255;

    /// Smallest purchasable amount.
    pub const MIN_ORDER_STARS: f64 = 50.0;

    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum AmountError {
        NotANumber,
        BelowMinimum,
    }

    /// Parse free-text input collected while the conversation expects an
    /// amount. Both failure modes keep the conversation in the same state.
    pub fn parse_amount(input: &str) -> Result<f64, AmountError> {
        let Ok(amount) = input.trim().parse::<f64>() else {
            return Err(AmountError::NotANumber);
        };
        if !amount.is_finite() {
            return Err(AmountError::NotANumber);
        }
        if amount < MIN_ORDER_STARS {
            return Err(AmountError::BelowMinimum);
        }
        Ok(amount)
    }

    pub fn price_for(amount: f64) -> f64 {
        amount * PRICE_PER_STAR
    }

    /// Invoice rendering contract: exactly two fractional digits.
    pub fn format_price(price: f64) -> String {
        format!("{price:.2}")
    }

    /// Integral star amounts render without a fractional part.
    pub fn format_amount(amount: f64) -> String {
        if amount.fract() == 0.0 {
            format!("{amount:.0}")
        } else {
            amount.to_string()
        }
    }
}

pub mod convo {
    /// One user's conversation position. `Idle` is the implicit start and
    /// terminal state; the session table represents it by absence.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub enum ConversationState {
        #[default]
        Idle,
        MenuShown,
        ExpectingAmount,
    }
}

pub mod buttons {
    /// Inline-button callback identifiers.
    ///
    /// The string forms are the stable contract with the transport; renaming
    /// them breaks every keyboard already delivered to users.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum CallbackId {
        Buy,
        Earn,
        Withdraw,
        Home,
    }

    impl CallbackId {
        pub fn as_str(&self) -> &'static str {
            match self {
                Self::Buy => "button1",
                Self::Earn => "button2",
                Self::Withdraw => "withdraw",
                Self::Home => "home",
            }
        }

        pub fn parse(data: &str) -> Option<Self> {
            match data {
                "button1" => Some(Self::Buy),
                "button2" => Some(Self::Earn),
                "withdraw" => Some(Self::Withdraw),
                "home" => Some(Self::Home),
                _ => None,
            }
        }
    }
}

pub mod model {
    use std::time::Duration;

    /// Referrals required before a withdrawal is offered.
    pub const WITHDRAW_MIN_REFERRALS: i64 = 100;

    /// Fixed receiving address shown on every invoice. Payments are not
    /// verified on-chain; the bot only displays the destination.
    pub const RECEIVING_ADDRESS: &str = "UQAV7UvOjM6o2rbU54To9V3GgmFUujbvCczOKB_nYFJwl9CS";

    pub const ORDER_ID_LEN: usize = 15;
    pub const WITHDRAW_REF_LEN: usize = 8;
    pub const INVOICE_VALID_MINUTES: u64 = 15;

    /// Usage samples older than this are eligible for deletion.
    pub const SAMPLE_RETENTION: Duration = Duration::from_secs(24 * 60 * 60);

    /// Window for the "last hour" traffic metrics.
    pub const STATS_WINDOW: Duration = Duration::from_secs(60 * 60);
}

#[cfg(test)]
mod tests {
    use super::buttons::CallbackId;
    use super::ids::{UserIdParseError, parse_user_id};
    use super::quote::{AmountError, format_amount, format_price, parse_amount, price_for};

    #[test]
    fn quote_for_100_stars_rounds_up_to_26_cents() {
        // 100 * 0.00255 lands just above 0.255 in binary, so two-digit
        // rendering carries up.
        assert_eq!(format_price(price_for(100.0)), "0.26");
    }

    #[test]
    fn quote_for_minimum_amount() {
        assert_eq!(format_price(price_for(50.0)), "0.13");
    }

    #[test]
    fn quote_price_is_linear_in_amount() {
        assert_eq!(format_price(price_for(200.0)), "0.51");
        assert_eq!(format_price(price_for(1000.0)), "2.55");
    }

    #[test]
    fn amounts_below_minimum_are_rejected() {
        assert_eq!(parse_amount("49.99"), Err(AmountError::BelowMinimum));
        assert_eq!(parse_amount("0"), Err(AmountError::BelowMinimum));
        assert_eq!(parse_amount("-50"), Err(AmountError::BelowMinimum));
    }

    #[test]
    fn non_numeric_amounts_are_rejected() {
        assert_eq!(parse_amount("fifty"), Err(AmountError::NotANumber));
        assert_eq!(parse_amount(""), Err(AmountError::NotANumber));
        assert_eq!(parse_amount("NaN"), Err(AmountError::NotANumber));
        assert_eq!(parse_amount("inf"), Err(AmountError::NotANumber));
    }

    #[test]
    fn amount_at_minimum_is_accepted() {
        assert_eq!(parse_amount("50"), Ok(50.0));
        assert_eq!(parse_amount(" 117.5 "), Ok(117.5));
    }

    #[test]
    fn integral_amounts_render_without_fraction() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(117.5), "117.5");
    }

    #[test]
    fn user_id_parse_accepts_plain_integers() {
        assert_eq!(parse_user_id("42").map(|id| id.as_i64()), Ok(42));
        assert_eq!(parse_user_id(" 7 ").map(|id| id.as_i64()), Ok(7));
    }

    #[test]
    fn user_id_parse_rejects_garbage() {
        assert_eq!(parse_user_id(""), Err(UserIdParseError::Empty));
        assert_eq!(parse_user_id("abc"), Err(UserIdParseError::NotANumber));
        assert_eq!(parse_user_id("12x"), Err(UserIdParseError::NotANumber));
    }

    #[test]
    fn callback_ids_round_trip_their_wire_form() {
        for id in [
            CallbackId::Buy,
            CallbackId::Earn,
            CallbackId::Withdraw,
            CallbackId::Home,
        ] {
            assert_eq!(CallbackId::parse(id.as_str()), Some(id));
        }
        assert_eq!(CallbackId::parse("button3"), None);
    }
}
