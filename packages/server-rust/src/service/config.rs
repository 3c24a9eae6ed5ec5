/// Naming for the metric series the service pipeline exports.
///
/// Every series name is `<namespace>_<subsystem>_<name>`.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    pub namespace: String,
    pub subsystem: String,
}

impl MetricsConfig {
    /// Fully qualified series name for `name`.
    #[must_use]
    pub fn series_name(&self, name: &str) -> String {
        [self.namespace.as_str(), self.subsystem.as_str(), name]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join("_")
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            namespace: "my_group".to_string(),
            subsystem: "string_service".to_string(),
        }
    }
}
