#![allow(dead_code)]

pub mod matsel_env;
pub mod mock_server;
