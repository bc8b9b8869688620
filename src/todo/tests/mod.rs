//! Unit tests for the task domain, gateway, session engine, and scheduler.
