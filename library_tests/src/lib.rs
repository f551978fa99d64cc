#[cfg(all(test, feature = "system_tests"))]
mod system_tests;


/// Address of the running library_books service, `LIBRARY_BOOKS_URL` overrides the default
#[cfg(all(test, any(feature = "system_tests", feature = "load_tests")))]
fn library_books_url() -> String {
    std::env::var("LIBRARY_BOOKS_URL").unwrap_or("http://127.0.0.1:8080".to_string())
}

#[cfg(all(test, any(feature = "system_tests", feature = "load_tests")))]
/// Random 13 digit isbn so that reruns against the same database do not collide
fn random_isbn(rng: &mut impl rand::Rng) -> String {
    format!("978{:010}", rng.gen_range(0..10_000_000_000u64))
}
