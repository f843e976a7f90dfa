pub mod connection;
pub mod weight_log_repository;

pub use connection::CsvConnection;
pub use weight_log_repository::WeightLogRepository;
