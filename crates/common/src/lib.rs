//! Shared helpers used by every crate in the workspace: tracing setup,
//! startup environment checks and small wire types.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok();
        assert_eq!(h.status, "ok");
        let json = serde_json::to_value(h).unwrap();
        assert_eq!(json, serde_json::json!({"status": "ok"}));
    }
}
