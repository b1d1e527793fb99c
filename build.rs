fn main() {
    // The RTC is set to this timestamp on boot when `sync_clock_to_build_time`
    // is enabled. Local time, matching what the user sees on the wall clock.
    let now = chrono::Local::now().naive_local();
    println!(
        "cargo:rustc-env=AROMATRON_BUILD_TIME={}",
        now.format("%Y-%m-%dT%H:%M:%S")
    );
    println!("cargo:rerun-if-changed=src");

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
