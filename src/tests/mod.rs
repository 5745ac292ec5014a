//! Test suite, split by concern rather than by module under test.

#[cfg(test)]
mod collision;
#[cfg(test)]
mod completeness;
