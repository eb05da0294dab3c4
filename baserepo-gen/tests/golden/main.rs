//! Golden tests comparing generated files with checked-in expectations.

mod repository_tests;
