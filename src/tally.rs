use std::convert::Infallible;
use std::str::FromStr;

use anyhow::Context;

use crate::reducer::Reducer;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TallyAction {
    Add,
    Subtract,
    Reset,
    /// Any discriminant the tally does not know, including the empty action
    /// used to compute the initial state.
    #[default]
    Unknown,
}

impl TallyAction {
    pub fn from_type(kind: &str) -> Self {
        match kind {
            "ADD" => Self::Add,
            "SUBTRACT" => Self::Subtract,
            "RESET" => Self::Reset,
            _ => Self::Unknown,
        }
    }

    pub fn as_type(&self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Subtract => "SUBTRACT",
            Self::Reset => "RESET",
            Self::Unknown => "",
        }
    }
}

impl FromStr for TallyAction {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_type(s))
    }
}

/// Tally counter: starts at zero, moves by one, resets to zero.
#[derive(Debug, Default, Clone, Copy)]
pub struct TallyReducer;

impl Reducer<i64, TallyAction> for TallyReducer {
    fn reduce(&self, state: Option<&i64>, action: &TallyAction) -> anyhow::Result<i64> {
        let count = state.copied().unwrap_or(0);
        match action {
            TallyAction::Add => count.checked_add(1).context("tally overflow"),
            TallyAction::Subtract => count.checked_sub(1).context("tally underflow"),
            TallyAction::Reset => Ok(0),
            TallyAction::Unknown => Ok(count),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_initial_state_is_zero() {
        let state = TallyReducer.reduce(None, &TallyAction::default()).unwrap();
        assert_eq!(state, 0);
    }

    #[test]
    fn test_transitions() {
        let reducer = TallyReducer;
        assert_eq!(reducer.reduce(Some(&4), &TallyAction::Add).unwrap(), 5);
        assert_eq!(reducer.reduce(Some(&4), &TallyAction::Subtract).unwrap(), 3);
        assert_eq!(reducer.reduce(Some(&4), &TallyAction::Reset).unwrap(), 0);
        assert_eq!(reducer.reduce(Some(&4), &TallyAction::Unknown).unwrap(), 4);
    }

    #[test]
    fn test_parse_discriminant() {
        assert_eq!(TallyAction::from_type("ADD"), TallyAction::Add);
        assert_eq!(TallyAction::from_type("SUBTRACT"), TallyAction::Subtract);
        assert_eq!("RESET".parse::<TallyAction>(), Ok(TallyAction::Reset));
        assert_eq!(TallyAction::from_type("add"), TallyAction::Unknown);
        assert_eq!(TallyAction::from_type(""), TallyAction::Unknown);
        assert_eq!(TallyAction::from_type(TallyAction::Add.as_type()), TallyAction::Add);
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(TallyReducer.reduce(Some(&i64::MAX), &TallyAction::Add).is_err());
        assert!(TallyReducer.reduce(Some(&i64::MIN), &TallyAction::Subtract).is_err());
    }
}
