pub mod db;
pub mod migrations;
