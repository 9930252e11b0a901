// Data access: CSV ingestion/writing and the read-only store behind the dashboard queries.
pub mod csv_parser;
pub mod dashboard_store;
