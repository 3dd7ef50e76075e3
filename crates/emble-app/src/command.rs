use emble_types::MaWindow;

/// One line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Anything that is not a `:` command goes to the analyst
    Chat(String),
    /// `:group` without a name clears the selection
    Group(Option<String>),
    Window(MaWindow),
    RefreshKpi,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
:group <name>     select an account group (no name clears it)
:window <3|6|12>  change the moving-average window
:kpi              refresh the KPI strip
:show             redraw KPIs and the series table
:quit             exit
anything else is sent to the Finance Analyst";

/// Parse a line of input. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Ok(Some(Command::Chat(line.to_string())));
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "group" | "g" => {
            Command::Group((!arg.is_empty()).then(|| arg.to_string()))
        }
        "window" | "w" => {
            let months: u32 = arg
                .parse()
                .map_err(|_| format!("window must be 3, 6 or 12, got '{}'", arg))?;
            Command::Window(MaWindow::try_from(months)?)
        }
        "kpi" => Command::RefreshKpi,
        "show" => Command::Show,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(format!("unknown command ':{}', try :help", other)),
    };

    Ok(Some(command))
}
