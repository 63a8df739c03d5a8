mod clauses;
mod collateral;
mod common;
mod domain;
mod draft;
mod examination;
mod service;
