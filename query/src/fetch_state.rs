/// What a component knows about its query at a point in time.
///
/// `data` and `error` are never both present: a success clears `error` and a
/// failure clears `data`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T, E> {
    /// A successful response has been normalized and stored.
    pub loaded: bool,
    /// A request is in flight.
    pub fetching: bool,
    pub data: Option<T>,
    pub error: Option<E>,
}

impl<T, E> Default for FetchState<T, E> {
    fn default() -> Self {
        Self {
            loaded: false,
            fetching: false,
            data: None,
            error: None,
        }
    }
}

impl<T, E> FetchState<T, E> {
    /// True while the first request is still out and nothing has come back.
    pub fn is_initial_loading(&self) -> bool {
        self.fetching && self.data.is_none() && self.error.is_none()
    }

    /// Merge a partial update, overwriting only the fields it carries.
    pub fn merge(&mut self, update: StateUpdate<T, E>) {
        if let Some(loaded) = update.loaded {
            self.loaded = loaded;
        }
        if let Some(fetching) = update.fetching {
            self.fetching = fetching;
        }
        if let Some(data) = update.data {
            self.data = data;
        }
        if let Some(error) = update.error {
            self.error = error;
        }
    }
}

/// A partial [`FetchState`]. `None` leaves the field untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct StateUpdate<T, E> {
    pub loaded: Option<bool>,
    pub fetching: Option<bool>,
    pub data: Option<Option<T>>,
    pub error: Option<Option<E>>,
}

impl<T, E> Default for StateUpdate<T, E> {
    fn default() -> Self {
        Self {
            loaded: None,
            fetching: None,
            data: None,
            error: None,
        }
    }
}

impl<T, E> StateUpdate<T, E> {
    /// A request went out. Previous data or error stays visible.
    pub fn started() -> Self {
        Self {
            fetching: Some(true),
            ..Self::default()
        }
    }

    pub fn succeeded(data: T) -> Self {
        Self {
            loaded: Some(true),
            fetching: Some(false),
            data: Some(Some(data)),
            error: Some(None),
        }
    }

    pub fn failed(error: E) -> Self {
        Self {
            loaded: Some(false),
            fetching: Some(false),
            data: Some(None),
            error: Some(Some(error)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type State = FetchState<&'static str, &'static str>;
    type Update = StateUpdate<&'static str, &'static str>;

    #[test]
    fn starts_empty() {
        let state = State::default();
        assert!(!state.loaded);
        assert!(!state.fetching);
        assert_eq!(state.data, None);
        assert_eq!(state.error, None);
        assert!(!state.is_initial_loading());
    }

    #[test]
    fn starting_keeps_previous_outcome() {
        let mut state = State::default();
        state.merge(Update::succeeded("old"));
        state.merge(Update::started());

        assert!(state.fetching);
        assert!(state.loaded);
        assert_eq!(state.data, Some("old"));
        assert!(!state.is_initial_loading());
    }

    #[test]
    fn failure_clears_data() {
        let mut state = State::default();
        state.merge(Update::succeeded("old"));
        state.merge(Update::started());
        state.merge(Update::failed("boom"));

        assert_eq!(
            state,
            State {
                loaded: false,
                fetching: false,
                data: None,
                error: Some("boom"),
            }
        );
    }

    #[test]
    fn success_clears_error() {
        let mut state = State::default();
        state.merge(Update::failed("boom"));
        state.merge(Update::started());
        assert!(!state.is_initial_loading());
        state.merge(Update::succeeded("new"));

        assert_eq!(
            state,
            State {
                loaded: true,
                fetching: false,
                data: Some("new"),
                error: None,
            }
        );
    }

    #[test]
    fn empty_update_changes_nothing() {
        let mut state = State::default();
        state.merge(Update::succeeded("kept"));
        let before = state.clone();
        state.merge(Update::default());
        assert_eq!(state, before);
    }
}
