/// A field of a decoded command: either explicitly submitted or not present
/// in the payload at all.
///
/// This is the load-bearing distinction of the preview path. A field the
/// submitter did not mention must pass the current value through unchanged,
/// which is impossible to express with a bare `Option` that also models
/// "cleared". Absent is never conflated with empty or null.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SparseField<T> {
    Absent,
    Present(T),
}

impl<T> SparseField<T> {
    pub fn is_present(&self) -> bool {
        matches!(self, SparseField::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, SparseField::Absent)
    }

    /// The proposed value if present, otherwise a copy of `current`.
    pub fn or_current(&self, current: &T) -> T
    where
        T: Clone,
    {
        match self {
            SparseField::Present(value) => value.clone(),
            SparseField::Absent => current.clone(),
        }
    }
}

impl<T> Default for SparseField<T> {
    fn default() -> Self {
        SparseField::Absent
    }
}
