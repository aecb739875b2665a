// State managers for the group engine.

pub mod group_manager;
