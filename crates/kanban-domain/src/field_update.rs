/// Patch value for an optional field: keep it, replace it, or clear it.
///
/// ```
/// use kanban_domain::FieldUpdate;
///
/// let mut limit = Some(5);
/// FieldUpdate::from_parts(None, false).apply(&mut limit);
/// assert_eq!(limit, Some(5));
///
/// FieldUpdate::from_parts(Some(8), false).apply(&mut limit);
/// assert_eq!(limit, Some(8));
///
/// FieldUpdate::<u32>::from_parts(None, true).apply(&mut limit);
/// assert_eq!(limit, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        Self::NoChange
    }
}

impl<T> FieldUpdate<T> {
    /// A new value wins over a clear request.
    pub fn from_parts(value: Option<T>, clear: bool) -> Self {
        match (value, clear) {
            (Some(value), _) => Self::Set(value),
            (None, true) => Self::Clear,
            (None, false) => Self::NoChange,
        }
    }

    pub fn apply(self, field: &mut Option<T>) {
        match self {
            Self::NoChange => {}
            Self::Set(value) => *field = Some(value),
            Self::Clear => *field = None,
        }
    }
}
