fn main() {
    // ESP-IDF environment is only needed for the device build; host tests
    // compile without the `espidf` feature.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
