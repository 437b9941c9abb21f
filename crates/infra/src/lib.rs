pub mod db;
pub mod reddit;
