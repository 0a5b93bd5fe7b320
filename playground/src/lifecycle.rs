use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Uninitialized,
    Initialized,
    Running,
    Terminated,
}

impl Lifecycle {
    pub fn advance(&mut self, to: Lifecycle) -> Result<(), LifecycleError> {
        use Lifecycle::*;

        match (*self, to) {
            (Uninitialized, Initialized)
            | (Initialized, Running)
            | (Running, Terminated)
            // startup failed, or closed before the first frame
            | (Uninitialized, Terminated)
            | (Initialized, Terminated) => {
                log::debug!("lifecycle {:?} -> {:?}", self, to);
                *self = to;
                Ok(())
            }
            (from, to) => Err(LifecycleError::InvalidTransition { from, to }),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::Uninitialized
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Invalid lifecycle transition from {from:?} to {to:?}")]
    InvalidTransition { from: Lifecycle, to: Lifecycle },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_run_test() {
        let mut state = Lifecycle::default();

        state.advance(Lifecycle::Initialized).unwrap();
        state.advance(Lifecycle::Running).unwrap();
        state.advance(Lifecycle::Terminated).unwrap();

        assert_eq!(state, Lifecycle::Terminated);
    }

    #[test]
    fn failed_startup_test() {
        let mut state = Lifecycle::default();

        state.advance(Lifecycle::Terminated).unwrap();

        assert_eq!(state, Lifecycle::Terminated);
    }

    #[test]
    fn invalid_transition_test() {
        let mut state = Lifecycle::default();

        assert_eq!(
            state.advance(Lifecycle::Running),
            Err(LifecycleError::InvalidTransition {
                from: Lifecycle::Uninitialized,
                to: Lifecycle::Running
            })
        );
        assert_eq!(state, Lifecycle::Uninitialized);

        state.advance(Lifecycle::Terminated).unwrap();
        assert!(state.advance(Lifecycle::Initialized).is_err());
        assert!(state.advance(Lifecycle::Terminated).is_err());
    }
}
