//! `rstest-bdd` behavioural tests for the `baserepo-gen` command line.

mod behaviour;
