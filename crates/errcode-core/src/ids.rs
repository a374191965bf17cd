use uuid::Uuid;

/// Returns a fresh error identifier, unique across processes.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}
