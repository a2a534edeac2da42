fn main() -> std::process::ExitCode {
    auction_tool::start(std::env::args())
}
