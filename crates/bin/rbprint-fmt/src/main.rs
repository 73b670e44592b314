use std::process::ExitCode;

use rbprint_tree::log;

fn main() -> ExitCode {
    if cfg!(debug_assertions) | cfg!(test) {
        colog::default_builder()
            .filter_level(log::LevelFilter::Trace)
            .init();
    } else {
        colog::default_builder().init();
    }
    rbprint_fmt::lib_main()
}
