pub mod board;
pub mod csv_io;
pub mod date_codec;
pub mod job;
pub mod schedule;
pub mod store;
