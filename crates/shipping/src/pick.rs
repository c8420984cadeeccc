use o2c_core::DomainError;

/// Validate the operator-entered picked quantity.
///
/// The trimmed text must be an integer equal to `required`. Errors name both
/// the offending value and the required one; nothing else is affected, so the
/// operator can simply retry.
pub fn parse_picked_quantity(input: &str, required: u32) -> Result<u32, DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!(
            "please enter the quantity picked: got '', required {required}"
        )));
    }

    let qty: i64 = trimmed.parse().map_err(|_| {
        DomainError::validation(format!(
            "invalid quantity '{trimmed}': must be a whole number, required {required}"
        ))
    })?;

    if qty != i64::from(required) {
        return Err(DomainError::validation(format!(
            "incorrect quantity: {qty}. Required: {required}."
        )));
    }
    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn exact_quantity_is_accepted() {
        assert_eq!(parse_picked_quantity("50", 50).unwrap(), 50);
        assert_eq!(parse_picked_quantity(" 50\n", 50).unwrap(), 50);
    }

    #[test]
    fn wrong_or_malformed_quantities_are_rejected() {
        for input in ["49", "51", "abc", "", "50abc", "5.0", "-50"] {
            let err = parse_picked_quantity(input, 50).unwrap_err();
            assert!(err.is_validation(), "{input:?} gave {err:?}");
        }
    }

    #[test]
    fn error_names_offending_and_required_value() {
        let msg = parse_picked_quantity("49", 50).unwrap_err().to_string();
        assert!(msg.contains("49") && msg.contains("50"), "{msg}");

        let msg = parse_picked_quantity("abc", 50).unwrap_err().to_string();
        assert!(msg.contains("'abc'") && msg.contains("50"), "{msg}");
    }

    proptest! {
        /// Property: every integer other than the required one is rejected.
        #[test]
        fn any_other_integer_is_rejected(qty in any::<i64>().prop_filter("not 50", |q| *q != 50)) {
            prop_assert!(parse_picked_quantity(&qty.to_string(), 50).is_err());
        }
    }
}
