use std::io::{self, stdin, stdout, Write};

use gcscr::Degree;

/// Prints `prompt` and reads one line, without the line terminator.
pub fn ask(prompt: &str) -> io::Result<String> {
    let mut stdout = stdout();
    stdout.write_all(prompt.as_bytes())?;
    stdout.flush()?;

    let mut line = String::with_capacity(64);
    if stdin().read_line(&mut line)? == 0 {
        return Err(io::ErrorKind::UnexpectedEof.into());
    }
    line.truncate(line.trim_end_matches(['\r', '\n']).len());
    Ok(line)
}

/// Numbered degree menu; asks again until a listed number is entered.
pub fn select_degree() -> io::Result<Degree> {
    let menu = Degree::ALL
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{}) {d}\n", i + 1))
        .collect::<String>();

    loop {
        let mut stdout = stdout();
        stdout.write_all(b"Select a degree:\n")?;
        stdout.write_all(menu.as_bytes())?;

        let choice = ask("Choice: ")?;
        if let Some(degree) = Degree::from_menu(&choice) {
            return Ok(degree);
        }
        println!("\x1b[31minvalid choice {:?}, try again\x1b[0m", choice.trim());
    }
}
