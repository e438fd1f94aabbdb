//! Screen state machine for the onboarding flow.
//!
//! First-time users go welcome → questionnaire → result → payment →
//! dashboard. Returning users jump from auth straight to welcome or
//! dashboard depending on whether they have paid. Every screen can fall
//! back to auth on sign-out.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// The screen currently shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    /// Sign-in / sign-up. Initial state.
    #[default]
    Auth,

    /// Paywall-gated landing for users without a paid profile.
    Welcome,

    /// Intake questionnaire.
    Questionnaire,

    /// Computed level plus the contact form.
    Result,

    /// One-time payment.
    Payment,

    /// Daily program.
    Dashboard,
}

impl Screen {
    pub fn as_str(&self) -> &'static str {
        match self {
            Screen::Auth => "auth",
            Screen::Welcome => "welcome",
            Screen::Questionnaire => "questionnaire",
            Screen::Result => "result",
            Screen::Payment => "payment",
            Screen::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StateMachine for Screen {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Screen::*;
        matches!(
            (self, target),
            // Session resolution
            (Auth, Welcome)
                | (Auth, Dashboard)
            // First-time flow
                | (Welcome, Questionnaire)
                | (Questionnaire, Result)
                | (Result, Payment)
                | (Payment, Dashboard)
            // Sign-out
                | (Welcome, Auth)
                | (Questionnaire, Auth)
                | (Result, Auth)
                | (Payment, Auth)
                | (Dashboard, Auth)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Screen::*;
        match self {
            Auth => vec![Welcome, Dashboard],
            Welcome => vec![Questionnaire, Auth],
            Questionnaire => vec![Result, Auth],
            Result => vec![Payment, Auth],
            Payment => vec![Dashboard, Auth],
            Dashboard => vec![Auth],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Screen; 6] = [
        Screen::Auth,
        Screen::Welcome,
        Screen::Questionnaire,
        Screen::Result,
        Screen::Payment,
        Screen::Dashboard,
    ];

    #[test]
    fn initial_screen_is_auth() {
        assert_eq!(Screen::default(), Screen::Auth);
    }

    #[test]
    fn first_time_flow_is_valid() {
        let mut screen = Screen::Auth;
        for next in [
            Screen::Welcome,
            Screen::Questionnaire,
            Screen::Result,
            Screen::Payment,
            Screen::Dashboard,
        ] {
            screen = screen.transition_to(next).unwrap();
        }
        assert_eq!(screen, Screen::Dashboard);
    }

    #[test]
    fn returning_premium_user_goes_straight_to_dashboard() {
        assert!(Screen::Auth.can_transition_to(&Screen::Dashboard));
    }

    #[test]
    fn cannot_skip_payment() {
        assert!(Screen::Result.transition_to(Screen::Dashboard).is_err());
        assert!(Screen::Welcome.transition_to(Screen::Payment).is_err());
        assert!(Screen::Questionnaire.transition_to(Screen::Payment).is_err());
    }

    #[test]
    fn every_screen_but_auth_can_sign_out() {
        for screen in ALL {
            let expected = screen != Screen::Auth;
            assert_eq!(screen.can_transition_to(&Screen::Auth), expected, "{}", screen);
        }
    }

    #[test]
    fn can_transition_to_is_consistent_with_valid_transitions() {
        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(&to),
                    from.valid_transitions().contains(&to),
                    "{} -> {}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn no_screen_is_terminal() {
        assert!(ALL.iter().all(|s| !s.is_terminal()));
    }
}
