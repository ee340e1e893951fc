mod deployment_tests;
mod fork_tests;
