pub mod billing_testkit;
