//! Integration tests for DERBY.

mod round_flow;
