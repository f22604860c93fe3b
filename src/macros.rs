// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

/// `posting!("Title", "Company", "Location")`, location optional.
/// Goes through `JobPosting::new`, so fields are normalized.
#[macro_export]
macro_rules! posting {
    ($title:expr, $company:expr) => {
        $crate::data::JobPosting::new($title, $company, "")
    };
    ($title:expr, $company:expr, $location:expr $(,)?) => {
        $crate::data::JobPosting::new($title, $company, $location)
    };
}
