pub mod app;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod connection;
pub mod deferred;
pub mod pages;
pub mod premium;
pub mod recommend;
pub mod search;
pub mod web;
