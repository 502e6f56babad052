/// Ports module defining interfaces for hexagonal architecture
///
/// Outbound ports (driven ports) describe every infrastructure capability
/// the use cases depend on.
pub mod outbound;
