//! Pieces shared by every crate in the workspace: response DTOs,
//! logging setup and startup filesystem checks.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_serializes_status_and_message() {
        let h = types::Health::ok("running");
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["status"], "ok");
        assert_eq!(v["message"], "running");
    }
}
