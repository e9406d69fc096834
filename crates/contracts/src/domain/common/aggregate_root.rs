use super::AggregateId;

/// Aggregate root: instance id plus static naming metadata.
///
/// The naming metadata drives table names on the backend and tab/menu
/// labels on the frontend.
pub trait AggregateRoot {
    type Id: AggregateId;

    fn id(&self) -> Self::Id;

    /// Aggregate index, e.g. "a001"
    fn aggregate_index() -> &'static str;

    /// Collection name, e.g. "supplier"
    fn collection_name() -> &'static str;

    /// Singular UI label
    fn element_name() -> &'static str;

    /// Plural UI label
    fn list_name() -> &'static str;

    /// Full system name, e.g. "a001_supplier". Also the table name.
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }
}
