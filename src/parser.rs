use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::Error;

/// Parse a currency amount typed at a prompt. Positivity is not checked
/// here; the account owns that rule so rejected amounts still reach it.
pub fn parse_amount(input: &str) -> Result<Decimal, Error> {
    let input = input.trim();
    input
        .parse::<Decimal>()
        .map_err(|_| Error::MalformedAmount(input.to_string()))
}

/// Parse a 1-based selection over a listing of `len` items into a 0-based
/// index. Anything non-numeric or out of range is a selection error.
pub fn parse_selection(input: &str, len: usize) -> Result<usize, Error> {
    let input = input.trim();
    let picked = input
        .parse::<usize>()
        .map_err(|_| Error::InvalidSelection(input.to_string()))?;
    if picked == 0 || picked > len {
        return Err(Error::InvalidSelection(input.to_string()));
    }
    Ok(picked - 1)
}

/// Parse an ISO `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, Error> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| Error::InvalidDate(input.to_string()))
}

#[cfg(test)]
mod tests {
    mod amounts {
        use rust_decimal_macros::dec;

        use crate::error::Error;
        use crate::parser::parse_amount;

        #[test]
        fn plain_and_fractional_values() {
            assert_eq!(Ok(dec!(1000)), parse_amount("1000"));
            assert_eq!(Ok(dec!(12.34)), parse_amount(" 12.34 "));
        }

        #[test]
        fn non_positive_values_still_parse() {
            // rejected later by the account, not by the parser
            assert_eq!(Ok(dec!(-50)), parse_amount("-50"));
            assert_eq!(Ok(dec!(0)), parse_amount("0"));
        }

        #[test]
        fn garbage_is_a_malformed_amount() {
            assert_eq!(
                Err(Error::MalformedAmount("ten".to_string())),
                parse_amount("ten")
            );
            assert_eq!(Err(Error::MalformedAmount("".to_string())), parse_amount(""));
        }
    }

    mod selections {
        use crate::error::Error;
        use crate::parser::parse_selection;

        #[test]
        fn one_based_input_maps_to_zero_based_index() {
            assert_eq!(Ok(0), parse_selection("1", 3));
            assert_eq!(Ok(2), parse_selection(" 3 ", 3));
        }

        #[test]
        fn out_of_range_is_rejected() {
            assert_eq!(
                Err(Error::InvalidSelection("4".to_string())),
                parse_selection("4", 3)
            );
            assert_eq!(
                Err(Error::InvalidSelection("0".to_string())),
                parse_selection("0", 3)
            );
            assert_eq!(
                Err(Error::InvalidSelection("1".to_string())),
                parse_selection("1", 0)
            );
        }

        #[test]
        fn non_numeric_is_rejected() {
            assert_eq!(
                Err(Error::InvalidSelection("first".to_string())),
                parse_selection("first", 3)
            );
        }
    }

    mod dates {
        use chrono::NaiveDate;

        use crate::error::Error;
        use crate::parser::parse_date;

        #[test]
        fn iso_dates_parse() {
            assert_eq!(
                Ok(NaiveDate::from_ymd_opt(1990, 5, 17).unwrap()),
                parse_date("1990-05-17")
            );
        }

        #[test]
        fn impossible_dates_are_rejected() {
            assert_eq!(
                Err(Error::InvalidDate("1990-02-30".to_string())),
                parse_date("1990-02-30")
            );
        }

        #[test]
        fn other_formats_are_rejected() {
            assert_eq!(
                Err(Error::InvalidDate("17/05/1990".to_string())),
                parse_date("17/05/1990")
            );
        }
    }
}
