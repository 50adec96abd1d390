mod builders_tests;
mod normalize_tests;
