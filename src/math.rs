pub mod normalization;
pub mod statistics;
