#![cfg(test)]


pub(crate) fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
