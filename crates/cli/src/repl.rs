//! Interactive session: one command per line, session events printed as
//! notifications. A failed command never ends the session.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::Receiver;

use carton_label_core::{Field, Flag, LabelSink, Session, SessionEvent};
use carton_label_devices::{PortEnumerator, ScaleReader};
use carton_label_render::preview_text;

use crate::report::{event_line, field_lines, session_lines};

const HELP: &str = "\
commands:
  load <path>              load the order spreadsheet (replaces any previous one)
  so <id>                  enter an SO number and fill the label from the first match
  set <field> <value>      edit one field (so, job, rbo, weight, item, qty, po, customer)
  flag <name> on|off       pdf, auto-weight, total-weight
  port <name>              select the scale port
  ports                    list serial ports
  printer <addr>           network printer address (IP[:PORT] or hostname)
  pdf-dir [dir]            folder for PDF labels (no argument clears it)
  weigh                    read the scale into the weight field
  show                     show fields, flags, and settings
  preview                  show the label as text
  print                    print the label
  help                     this text
  quit                     leave the session
";

enum Control {
    Continue,
    Quit,
}

/// Drives a [`Session`] from text commands.
pub(crate) struct Repl<S, P, K> {
    session: Session,
    events: Receiver<SessionEvent>,
    scale: S,
    ports: P,
    sink: K,
    prompt: bool,
}

impl<S: ScaleReader, P: PortEnumerator, K: LabelSink> Repl<S, P, K> {
    pub(crate) fn new(mut session: Session, scale: S, ports: P, sink: K) -> Self {
        let events = session.subscribe();
        Self {
            session,
            events,
            scale,
            ports,
            sink,
            prompt: false,
        }
    }

    /// Print a prompt before each command (for terminals).
    pub(crate) fn with_prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    /// Load a spreadsheet before the first command.
    pub(crate) fn preload(&mut self, path: PathBuf, out: &mut impl Write) -> io::Result<()> {
        let _ = self.session.load_dataset(path);
        self.flush_events(out)
    }

    /// Read commands until `quit` or end of input.
    pub(crate) fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> io::Result<()> {
        self.show_prompt(out)?;
        for line in input.lines() {
            let line = line?;
            let control = self.execute(line.trim(), out)?;
            self.flush_events(out)?;
            if let Control::Quit = control {
                return Ok(());
            }
            self.show_prompt(out)?;
        }
        Ok(())
    }

    fn show_prompt(&self, out: &mut impl Write) -> io::Result<()> {
        if self.prompt {
            write!(out, "carton> ")?;
            out.flush()?;
        }
        Ok(())
    }

    fn flush_events(&self, out: &mut impl Write) -> io::Result<()> {
        for event in self.events.try_iter() {
            if let Some(line) = event_line(&event) {
                writeln!(out, "{line}")?;
            }
        }
        Ok(())
    }

    fn execute(&mut self, line: &str, out: &mut impl Write) -> io::Result<Control> {
        if line.is_empty() || line.starts_with('#') {
            return Ok(Control::Continue);
        }
        let (cmd, rest) = line
            .split_once(char::is_whitespace)
            .map(|(c, r)| (c, r.trim()))
            .unwrap_or((line, ""));

        // Session failures surface as published notices, so results are
        // only inspected where success prints something extra.
        match cmd.to_ascii_lowercase().as_str() {
            "load" => {
                if rest.is_empty() {
                    writeln!(out, "error: usage: load <path>")?;
                } else {
                    let _ = self.session.load_dataset(rest);
                }
            }
            "so" => {
                if self.session.set_so_number(rest).is_ok() {
                    write!(out, "{}", field_lines(self.session.fields()))?;
                }
            }
            "set" => {
                let (name, value) = rest
                    .split_once(char::is_whitespace)
                    .map(|(n, v)| (n, v.trim()))
                    .unwrap_or((rest, ""));
                match name.parse::<Field>() {
                    Ok(field) => {
                        if self.session.set_field(field, value).is_ok() && field == Field::SoNumber {
                            write!(out, "{}", field_lines(self.session.fields()))?;
                        }
                    }
                    Err(e) => writeln!(out, "error: {e}")?,
                }
            }
            "flag" => {
                let (name, state) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                let enabled = match state.trim().to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" | "1" => Some(true),
                    "off" | "false" | "no" | "0" => Some(false),
                    _ => None,
                };
                match (name.parse::<Flag>(), enabled) {
                    (Ok(flag), Some(enabled)) => {
                        self.session.set_flag(flag, enabled);
                        writeln!(out, "{flag}: {}", if enabled { "on" } else { "off" })?;
                    }
                    (Err(e), _) => writeln!(out, "error: {e}")?,
                    (Ok(_), None) => writeln!(out, "error: usage: flag <name> on|off")?,
                }
            }
            "port" => {
                let _ = self.session.select_port(rest, &self.ports);
            }
            "ports" => {
                let ports = self.ports.list_ports();
                if ports.is_empty() {
                    writeln!(out, "no serial ports found")?;
                }
                for port in ports {
                    writeln!(out, "{port}")?;
                }
            }
            "printer" => {
                if rest.is_empty() {
                    writeln!(out, "printer: {}", self.session.settings().printer_address)?;
                } else {
                    self.session.set_printer_address(rest);
                    writeln!(out, "printer: {rest}")?;
                }
            }
            "pdf-dir" => {
                if rest.is_empty() {
                    self.session.set_pdf_folder(None);
                    writeln!(out, "PDF folder cleared")?;
                } else {
                    self.session.set_pdf_folder(Some(PathBuf::from(rest)));
                    writeln!(out, "PDF folder: {rest}")?;
                }
            }
            "weigh" => {
                let _ = self.session.read_weight(&mut self.scale);
            }
            "show" => write!(
                out,
                "{}",
                session_lines(self.session.fields(), self.session.settings())
            )?,
            "preview" => write!(out, "{}", preview_text(self.session.fields()))?,
            "print" => {
                let _ = self.session.print(&mut self.sink, &mut self.scale);
            }
            "help" | "?" => write!(out, "{HELP}")?,
            "quit" | "exit" => return Ok(Control::Quit),
            other => writeln!(out, "error: unknown command '{other}' (try 'help')")?,
        }
        Ok(Control::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carton_label_core::{Dataset, Delivery, Destination, LabelFields, OutputError, SessionSettings};
    use carton_label_devices::DeviceError;

    struct FixedScale(f64);

    impl ScaleReader for FixedScale {
        fn read_weight(&mut self, _port: &str) -> Result<f64, DeviceError> {
            Ok(self.0)
        }
    }

    struct FixedPorts;

    impl PortEnumerator for FixedPorts {
        fn list_ports(&self) -> Vec<String> {
            vec!["/dev/ttyUSB0".into()]
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<LabelFields>);

    impl LabelSink for &mut Recorder {
        fn deliver(
            &mut self,
            fields: &LabelFields,
            destination: &Destination,
        ) -> Result<Delivery, OutputError> {
            self.0.push(fields.clone());
            Ok(Delivery {
                destination: destination.clone(),
                bytes: 1,
            })
        }
    }

    fn session() -> Session {
        let mut session = Session::new(SessionSettings::default());
        session.replace_dataset(Dataset::from_table(vec![
            vec![
                "SO Number",
                "Job Number",
                "RBO",
                "Weight",
                "Item",
                "Order Qty",
                "PO Number",
                "Customer",
            ],
            vec!["SO100", "J1", "R1", "12.5", "Widget", "4", "PO9", "Acme"],
        ]));
        session
    }

    fn run(script: &str, recorder: &mut Recorder) -> String {
        let mut repl = Repl::new(session(), FixedScale(7.5), FixedPorts, recorder);
        let mut out = Vec::new();
        repl.run(script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lookup_then_print() {
        let mut recorder = Recorder::default();
        let out = run("so SO100\nprint\nquit\n", &mut recorder);
        assert!(out.contains("Job Number:         J1\n"));
        assert!(out.contains("info: Label sent to printer 10.1.10.110."));
        assert_eq!(recorder.0.len(), 1);
        assert_eq!(recorder.0[0].customer, "Acme");
    }

    #[test]
    fn errors_do_not_end_session() {
        let mut recorder = Recorder::default();
        let out = run(
            "so SO999\nbogus\nflag pdf maybe\nport COM9\nso SO100\nprint\n",
            &mut recorder,
        );
        assert!(out.contains("info: SO Number 'SO999' not found in the order data"));
        assert!(out.contains("error: unknown command 'bogus'"));
        assert!(out.contains("error: usage: flag <name> on|off"));
        assert!(out.contains("error: invalid port selected: COM9"));
        assert_eq!(recorder.0.len(), 1);
    }

    #[test]
    fn weigh_after_port_selection() {
        let mut recorder = Recorder::default();
        let out = run("weigh\nport /dev/ttyUSB0\nweigh\nshow\n", &mut recorder);
        assert!(out.contains("error: Scale reading failed: no scale port selected"));
        assert!(out.contains("scale port: /dev/ttyUSB0"));
        assert!(out.contains("weight: 7.5"));
        assert!(out.contains("Weight:             7.5\n"));
    }

    #[test]
    fn pdf_without_folder_is_reported() {
        let mut recorder = Recorder::default();
        let out = run("so SO100\nflag pdf on\nprint\n", &mut recorder);
        assert!(out.contains("Print to PDF: on"));
        assert!(out.contains("error: print to PDF is enabled but no PDF folder is selected"));
        assert!(recorder.0.is_empty());
    }

    #[test]
    fn preview_includes_total_weight() {
        let mut recorder = Recorder::default();
        let out = run("so SO100\nflag total on\npreview\n", &mut recorder);
        assert!(out.contains("Total Weight:  50\n"));
        assert!(out.contains("Barcode: *SO100*"));
    }

    #[test]
    fn quit_stops_reading() {
        let mut recorder = Recorder::default();
        let out = run("quit\nhelp\n", &mut recorder);
        assert!(!out.contains("commands:"));
    }
}
