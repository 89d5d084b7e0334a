use std::io;

fn main() -> io::Result<()> {
    sage_chess::uci::run_stdio_loop()
}
