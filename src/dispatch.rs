//! Command dispatch module for pidbm
//!
//! Routes a parsed sub-command (`list`, `show`, `add`, `cp`, `mod`, `rm`)
//! and its positional arguments to the view-specific logic, composing the
//! resolver, the query builder and the record engine. Composite listings
//! progressively narrow the join expression and predicate from the
//! trailing arguments; the join templates live here, next to the only
//! code that uses them.
//!
//! Arguments are indexed the way they arrive on the command line:
//! `args[0]` is the sub-command, `args[1]` the view, the rest the values.

use crate::config::Config;
use crate::connector::Connector;
use crate::db::Database;
use crate::engine::Engine;
use crate::error::{PidbmError, PidbmResult};
use crate::gpio::Gpio;
use crate::pin::{Pin, PinType, INPUT_MODE_ID};
use crate::prompt::{self, LineReader};
use crate::query::{CompareOp, Predicate};
use crate::render;
use crate::resolver::{self, WhereCondition};
use crate::soc::Soc;
use crate::views;

/// Base join for pin listings: one row per (pin, mode, name)
const PIN_FROM: &str = "pin \
     INNER JOIN pin_type ON pin_type.id = pin.pin_type_id \
     INNER JOIN pin_has_name ON pin.id = pin_has_name.pin_id \
     INNER JOIN pin_name ON pin_name.id = pin_has_name.pin_name_id \
     INNER JOIN pin_mode ON pin_mode.id = pin_has_name.pin_mode_id ";

/// Pin join extended with numbers and gpio membership, for GPIO pins
const PIN_GPIO_FROM: &str = "pin \
     INNER JOIN pin_type ON pin_type.id = pin.pin_type_id \
     INNER JOIN pin_has_name ON pin.id = pin_has_name.pin_id \
     INNER JOIN pin_name ON pin_name.id = pin_has_name.pin_name_id \
     INNER JOIN pin_mode ON pin_mode.id = pin_has_name.pin_mode_id \
     INNER JOIN pin_number ON pin.id = pin_number.pin_id \
     INNER JOIN gpio_has_pin ON pin.id = gpio_has_pin.pin_id ";

/// Pin join extended with SoC membership, for `list pin soc`
const PIN_SOC_FROM: &str = "pin \
     INNER JOIN pin_type ON pin_type.id = pin.pin_type_id \
     INNER JOIN pin_has_name ON pin.id = pin_has_name.pin_id \
     INNER JOIN pin_name ON pin_name.id = pin_has_name.pin_name_id \
     INNER JOIN pin_mode ON pin_mode.id = pin_has_name.pin_mode_id \
     INNER JOIN soc_has_pin ON pin.id = soc_has_pin.pin_id \
     INNER JOIN soc ON soc.id = soc_has_pin.soc_id ";

/// Narrowing joins appended for `list pin <type> soc <x>`
const SOC_NARROW_JOIN: &str = "INNER JOIN soc_has_pin ON pin.id = soc_has_pin.pin_id \
     INNER JOIN soc ON soc.id = soc_has_pin.soc_id ";

/// Full pin map of a gpio, for `list gpio pin`
const GPIO_PIN_FROM: &str = "gpio_has_pin \
     INNER JOIN gpio ON gpio.id = gpio_has_pin.gpio_id \
     INNER JOIN pin ON pin.id = gpio_has_pin.pin_id \
     INNER JOIN pin_type ON pin_type.id = pin.pin_type_id \
     INNER JOIN pin_has_name ON pin.id = pin_has_name.pin_id \
     INNER JOIN pin_name ON pin_name.id = pin_has_name.pin_name_id \
     INNER JOIN pin_mode ON pin_mode.id = pin_has_name.pin_mode_id \
     INNER JOIN pin_number ON pin.id = pin_number.pin_id ";

/// Views the `mod` sub-command accepts
const MOD_VIEWS: &[&str] = &[
    "board_family",
    "board_model",
    "board",
    "gpio",
    "connector",
    "manufacturer",
    "pin_type",
    "pin_mode",
    "pin_name",
];

/// Views the `rm` sub-command accepts, besides the cascading `board`
const RM_VIEWS: &[&str] = &["board_model", "gpio", "connector", "manufacturer", "pin_name"];

/// Per-invocation command dispatcher
///
/// Borrows the shared session, the configuration and the interactive line
/// source; holds no state of its own between commands.
pub struct Dispatcher<'a> {
    db: &'a Database,
    config: Config,
    reader: &'a mut dyn LineReader,
}

impl<'a> Dispatcher<'a> {
    pub fn new(db: &'a Database, config: Config, reader: &'a mut dyn LineReader) -> Self {
        Dispatcher { db, config, reader }
    }

    /// Route one parsed command line
    pub fn run(&mut self, args: &[String]) -> PidbmResult<()> {
        let command = args
            .first()
            .ok_or_else(|| PidbmError::invalid("no command provided"))?;

        match command.as_str() {
            "list" => self.list(args),
            "add" => self.add(args),
            "mod" => self.modify(args),
            "rm" => self.remove(args),
            "show" => self.show(args),
            "cp" => self.copy(args),
            other => Err(PidbmError::invalid(format!("invalid command: {other}"))),
        }
    }

    fn engine(&self) -> Engine<'_> {
        Engine::new(self.db, &self.config)
    }

    fn quiet(&self) -> bool {
        self.config.quiet()
    }

    /// Column projection of a view as an owned vector
    fn what_vec(view: &str) -> Vec<String> {
        views::what(view)
            .map(|columns| columns.iter().map(|c| c.to_string()).collect())
            .unwrap_or_default()
    }

    /// Resolve a foreign-key token or fail naming the view and token
    fn resolve_required(&self, view: &str, token: &str) -> PidbmResult<i64> {
        resolver::resolve(self.db, view, token, true)?
            .ok_or_else(|| PidbmError::not_found(view, token))
    }

    /// Append the `-M` pin mode filter when set
    fn apply_mode_filter(&self, predicate: &mut Predicate) -> PidbmResult<()> {
        if let Some(mode) = self.config.mode() {
            let id = self.resolve_required("pin_mode", mode)?;
            predicate.push("pin_mode.id", CompareOp::Eq, id.to_string());
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // list

    fn list(&mut self, args: &[String]) -> PidbmResult<()> {
        let view = args
            .get(1)
            .ok_or_else(|| PidbmError::invalid("no table provided"))?
            .clone();

        match view.as_str() {
            "board" => self.list_board(args),
            "connector" => self.list_connector(args),
            "pin" => self.list_pin(args),
            "gpio" => self.list_gpio(args),
            v if views::is_view(v) => self.list_plain(v, args),
            v => Err(PidbmError::invalid(format!("invalid table {v}"))),
        }
    }

    /// `list <view> [name_like|id]` over a single table
    fn list_plain(&mut self, view: &str, args: &[String]) -> PidbmResult<()> {
        let what = Self::what_vec(view);
        let mut predicate = Predicate::new();
        if let Some(token) = args.get(2) {
            resolver::where_condition(token, None).apply_to(&mut predicate);
        }
        render::print_records(self.db, &what, view, &predicate, None, None)?;
        Ok(())
    }

    /// `list board [token]`, `list board revision [value]`, `list board tag [value]`
    fn list_board(&mut self, args: &[String]) -> PidbmResult<()> {
        let mut what = Self::what_vec("board");
        let mut from = "board".to_string();
        let mut preset = None;
        let mut pos = 2;

        match args.get(2).map(String::as_str) {
            Some("revision") => {
                what.insert(0, "%revision".to_string());
                from = "revision INNER JOIN board ON revision.board_id=board.id".to_string();
                preset = Some("revision");
                pos = 3;
            }
            Some("tag") => {
                what.insert(0, "tag".to_string());
                from = "tag INNER JOIN board ON tag.board_id=board.id".to_string();
                preset = Some("tag");
                pos = 3;
            }
            _ => {}
        }

        let mut predicate = Predicate::new();
        if let Some(token) = args.get(pos) {
            resolver::where_condition(token, preset).apply_to(&mut predicate);
        }
        render::print_records(self.db, &what, &from, &predicate, None, None)?;
        Ok(())
    }

    /// `list connector [token]` and the gpio/board composites
    fn list_connector(&mut self, args: &[String]) -> PidbmResult<()> {
        let mut what = Self::what_vec("connector");
        let mut from = "connector".to_string();
        let mut preset = None;
        let mut order_by = None;
        let mut pos = 2;

        if args.len() > 3 {
            let sub = args[2].as_str();
            pos = 3;
            order_by = Some("gpio_has_connector.num");
            what.insert(0, "num".to_string());

            match sub {
                "gpio" => {
                    preset = Some("gpio.");
                    from = "connector \
                            INNER JOIN gpio_has_connector ON connector_id=connector.id \
                            INNER JOIN gpio ON gpio_has_connector.gpio_id=gpio.id"
                        .to_string();
                }
                "board" => {
                    preset = Some("board.");
                    from = "connector \
                            INNER JOIN gpio_has_connector ON connector_id=connector.id \
                            INNER JOIN board ON board.gpio_id=gpio_has_connector.gpio_id"
                        .to_string();
                }
                other => {
                    return Err(PidbmError::invalid(format!("invalid sub-command {other}")));
                }
            }
        }

        let mut predicate = Predicate::new();
        if let Some(token) = args.get(pos) {
            resolver::where_condition(token, preset).apply_to(&mut predicate);
        }
        render::print_records(self.db, &what, &from, &predicate, order_by, None)?;
        Ok(())
    }

    /// Pin listings with progressive narrowing
    ///
    /// `list pin [token]`, `list pin <type> [token]`,
    /// `list pin <type> soc <x>` and `list pin soc <x>`; all accept the
    /// `-M` mode filter and order by pin name.
    fn list_pin(&mut self, args: &[String]) -> PidbmResult<()> {
        let mut what = Self::what_vec("pin");
        let mut from = PIN_FROM.to_string();
        let mut predicate = Predicate::new();

        if let Some(sub) = args.get(2) {
            if let Some(type_id) = resolver::name_exists(self.db, "pin_type", sub, true)? {
                if type_id == PinType::Gpio.id() {
                    from = PIN_GPIO_FROM.to_string();
                    what = Self::what_vec("pin_gpio");
                }

                if args.len() > 4 && args[3] == "soc" {
                    from.push_str(SOC_NARROW_JOIN);
                    resolver::where_condition(&args[4], Some("soc.")).apply_to(&mut predicate);
                } else if let Some(token) = args.get(3) {
                    resolver::where_condition(token, None)
                        .map_column(|c| match c {
                            "name" => "pin_name.name".to_string(),
                            "id" => "pin.id".to_string(),
                            other => other.to_string(),
                        })
                        .apply_to(&mut predicate);
                }

                predicate.push("pin.pin_type_id", CompareOp::Eq, type_id.to_string());
            } else if sub == "soc" && args.len() > 3 {
                from = PIN_SOC_FROM.to_string();
                what = Self::what_vec("pin_soc");
                resolver::where_condition(&args[3], Some("soc.")).apply_to(&mut predicate);
            }
        }

        if predicate.is_empty() {
            if let Some(token) = args.get(2) {
                resolver::where_condition(token, None)
                    .map_column(|c| match c {
                        "name" => "pin_name.name".to_string(),
                        "id" => "pin.id".to_string(),
                        other => other.to_string(),
                    })
                    .apply_to(&mut predicate);
            }
        }

        self.apply_mode_filter(&mut predicate)?;
        render::print_records(self.db, &what, &from, &predicate, Some("pin_name.name"), None)?;
        Ok(())
    }

    /// `list gpio [token]` and `list gpio pin [token]`
    fn list_gpio(&mut self, args: &[String]) -> PidbmResult<()> {
        if args.get(2).map(String::as_str) == Some("pin") {
            let what = Self::what_vec("pin_gpio");
            let mut predicate = Predicate::new();

            if let Some(token) = args.get(3) {
                resolver::where_condition(token, None)
                    .map_column(|c| match c {
                        "name" => "gpio.name".to_string(),
                        "id" => "gpio_has_pin.gpio_id".to_string(),
                        other => other.to_string(),
                    })
                    .apply_to(&mut predicate);
            }

            self.apply_mode_filter(&mut predicate)?;
            render::print_records(
                self.db,
                &what,
                GPIO_PIN_FROM,
                &predicate,
                Some("ino_pin_num"),
                None,
            )?;
            return Ok(());
        }

        self.list_plain("gpio", args)
    }

    // -----------------------------------------------------------------
    // show

    /// `show connector <token>` / `show gpio <token>`
    ///
    /// Every matching row is hydrated into its aggregate and
    /// pretty-printed, so a name fragment can show several items.
    fn show(&mut self, args: &[String]) -> PidbmResult<()> {
        let view = args
            .get(1)
            .ok_or_else(|| PidbmError::invalid("no argument provided"))?
            .clone();

        if (view == "connector" || view == "gpio") && args.len() > 2 {
            let mut predicate = Predicate::new();
            resolver::where_condition(&args[2], None).apply_to(&mut predicate);

            let ids = self.engine().select(
                &["id".to_string()],
                &view,
                &predicate,
                None,
                None,
            )?;
            for row in &ids {
                let id: i64 = row[0].parse().unwrap_or(-1);
                match view.as_str() {
                    "connector" => print!("{}", Connector::load(self.db, id)?),
                    _ => print!("{}", Gpio::load(self.db, id)?),
                }
            }
            Ok(())
        } else {
            Err(PidbmError::invalid(format!("invalid table {view}")))
        }
    }

    // -----------------------------------------------------------------
    // add

    fn add(&mut self, args: &[String]) -> PidbmResult<()> {
        if args.len() <= 2 {
            return Err(PidbmError::invalid("nothing to add !"));
        }
        let to = args[1].clone();
        let values: Vec<String> = args[2..].to_vec();

        match to.as_str() {
            "manufacturer" if !values.is_empty() => self.add_simple(
                "manufacturer",
                &["name"],
                vec![values[0].clone()],
                false,
            ),
            "pin" if values.len() >= 2 => self.add_pin(&values),
            "name2pin" if values.len() >= 3 => self.add_name2pin(&values),
            "pin2gpio" if values.len() >= 2 => self.add_pin2gpio(&values),
            "pin2soc" if !values.is_empty() => self.add_pin2soc(&values),
            "pin2con" if !values.is_empty() => self.add_pin2con(&values),
            "connector" if values.len() >= 3 => self.add_connector(&values),
            "gpio" if values.len() >= 2 => self.add_gpio(&values),
            "con2gpio" if values.len() >= 3 => self.add_con2gpio(&values),
            "board_model" if values.len() >= 3 => self.add_board_model(&values),
            "board" if values.len() >= 7 => self.add_board(&values),
            _ => Err(PidbmError::invalid(format!("invalid sub-command: {to}"))),
        }
    }

    /// Insert one row and report the generated id
    fn add_simple(
        &mut self,
        table: &str,
        columns: &[&str],
        values: Vec<String>,
        idempotent: bool,
    ) -> PidbmResult<()> {
        let id = self.engine().insert(columns, table, &values, idempotent)?;
        if !self.quiet() {
            println!("1 record added to {table} (id:{id}).");
        }
        Ok(())
    }

    /// `add pin <type> <input_name> [soc_pin_num sys_pin_num]`
    ///
    /// Creates the missing `pin_name` and `pin` rows, reports the ids of
    /// rows that already exist instead of duplicating them, and for GPIO
    /// pins records or refreshes the SoC/system pin numbers.
    fn add_pin(&mut self, values: &[String]) -> PidbmResult<()> {
        let engine = self.engine();

        let type_id = resolver::name_exists(self.db, "pin_type", &values[0], true)?
            .ok_or_else(|| {
                PidbmError::invalid(format!(
                    "{} invalid pin type name, use `list pin_type` to see them.",
                    values[0]
                ))
            })?;

        if type_id == PinType::Gpio.id() && values.len() < 4 {
            return Err(PidbmError::invalid(
                "You must provide 2 numbers for a GPIO pin (soc, system).",
            ));
        }

        let pin_name_id = match resolver::name_exists(self.db, "pin_name", &values[1], false)? {
            Some(id) => {
                if !self.quiet() {
                    println!("pin_name '{}' found (id:{id}), nothing to add.", values[1]);
                }
                id
            }
            None => {
                let id = engine.insert(&["name"], "pin_name", &[values[1].clone()], false)?;
                if !self.quiet() {
                    println!("pin_name '{}' added (id:{id}).", values[1]);
                }
                id
            }
        };

        let mut predicate = Predicate::new();
        predicate.push("pin_mode_id", CompareOp::Eq, INPUT_MODE_ID.to_string());
        predicate.push("pin_name_id", CompareOp::Eq, pin_name_id.to_string());
        predicate.push("pin_type_id", CompareOp::Eq, type_id.to_string());
        let existing = engine.select(
            &["pin.id".to_string()],
            "pin INNER JOIN pin_has_name ON pin.id=pin_has_name.pin_id",
            &predicate,
            None,
            None,
        )?;

        let pin_id = match existing.first() {
            Some(row) => {
                if !self.quiet() {
                    println!(
                        "pin with name '{}' and type {} found (id:{}), nothing to add.",
                        values[1], values[0], row[0]
                    );
                }
                row[0].clone()
            }
            None => {
                let id = engine.insert(&["pin_type_id"], "pin", &[type_id.to_string()], false)?;
                engine.insert(
                    &["pin_id", "pin_name_id", "pin_mode_id"],
                    "pin_has_name",
                    &[id.to_string(), pin_name_id.to_string(), INPUT_MODE_ID.to_string()],
                    false,
                )?;
                if !self.quiet() {
                    println!("pin '{}' added (id:{id}).", values[1]);
                }
                id.to_string()
            }
        };

        if type_id == PinType::Gpio.id() {
            for num in &values[2..4] {
                if resolver::parse_integer(num).is_none() {
                    return Err(PidbmError::invalid(format!("{num} invalid pin number.")));
                }
            }

            let what = Self::what_vec("pin_number");
            let existing = engine.select_where(&what, "pin_number", "pin_id", &pin_id)?;
            if existing.first().is_some() {
                if !self.quiet() {
                    println!("pin_number record found (id:{pin_id}), has been updated.");
                }
                let mut predicate = Predicate::new();
                predicate.push("pin_id", CompareOp::Eq, pin_id.clone());
                engine.update(&what[1..], "pin_number", predicate, values[2..4].to_vec())?;
            } else {
                let mut row = vec![pin_id.clone()];
                row.extend_from_slice(&values[2..4]);
                engine.insert(
                    &["pin_id", "soc_pin_num", "sys_pin_num"],
                    "pin_number",
                    &row,
                    false,
                )?;
            }
        }
        Ok(())
    }

    /// `add name2pin <pin> <mode> <name> [mode name ...]`
    fn add_name2pin(&mut self, values: &[String]) -> PidbmResult<()> {
        let engine = self.engine();

        let pin_id = resolver::find_pin(self.db, &values[0])?
            .ok_or_else(|| PidbmError::invalid(format!("pin {} not found !", values[0])))?;

        let pin = Pin::load(self.db, pin_id)?;
        if pin.pin_type() != Some(PinType::Gpio) {
            return Err(PidbmError::invalid(format!(
                "{} is not a GPIO type pin.",
                values[0]
            )));
        }

        let mut i = 1;
        while i + 1 < values.len() {
            let mode = &values[i];
            let name = &values[i + 1];

            let mode_id = resolver::name_exists(self.db, "pin_mode", mode, true)?
                .ok_or_else(|| {
                    PidbmError::invalid(format!(
                        "{mode} invalid pin mode name, use `list pin_mode` to see them."
                    ))
                })?;

            let name_id = match resolver::name_exists(self.db, "pin_name", name, false)? {
                Some(id) => id,
                None => engine.insert(&["name"], "pin_name", &[name.clone()], false)?,
            };

            engine.insert(
                &["pin_id", "pin_name_id", "pin_mode_id"],
                "pin_has_name",
                &[pin_id.to_string(), name_id.to_string(), mode_id.to_string()],
                true,
            )?;
            i += 2;
        }
        Ok(())
    }

    /// `add pin2gpio <gpio> <ino_num> [pin]`
    ///
    /// Without a pin argument, reads pins one by one from the operator,
    /// auto-incrementing the ino number, until the `q`/`Q` sentinel.
    fn add_pin2gpio(&mut self, values: &[String]) -> PidbmResult<()> {
        let gpio_id = self.resolve_required("gpio", &values[0])?;
        let start = resolver::parse_integer(&values[1])
            .ok_or_else(|| PidbmError::invalid(format!("{} invalid pin number.", values[1])))?;

        let mut pins: Vec<(i64, i64)> = Vec::new();

        if values.len() < 3 {
            let gpio_name = self
                .engine()
                .select_where(&["name".to_string()], "gpio", "id", &gpio_id.to_string())?
                .first()
                .map(|r| r[0].clone())
                .unwrap_or_default();

            println!("-- Adds pins to the {gpio_name} Gpio (id:{gpio_id}) --");
            println!("Enter the pin one by one then ENTER, press [q/Q] to exit.");

            let mut num = start;
            loop {
                let line = match self
                    .reader
                    .read_line(&format!("Pin #{num}, pin_id or pin_name ? "))?
                {
                    Some(line) => line,
                    None => break,
                };
                let token = line.trim();
                if prompt::is_quit(token) {
                    break;
                }
                if token.is_empty() {
                    continue;
                }

                match resolver::find_pin(self.db, token)? {
                    Some(pin_id) => {
                        let pin = Pin::load(self.db, pin_id)?;
                        if pin.pin_type() != Some(PinType::Gpio) {
                            return Err(PidbmError::invalid(format!(
                                "{token} is not a GPIO type pin."
                            )));
                        }
                        pins.push((pin_id, num));
                        num += 1;
                    }
                    None => println!("pin {token} not found !"),
                }
            }
        } else {
            match resolver::find_pin(self.db, &values[2])? {
                Some(pin_id) => pins.push((pin_id, start)),
                None => println!("pin {} not found !", values[2]),
            }
        }

        let engine = self.engine();
        for (pin_id, ino) in pins {
            engine.insert(
                &["gpio_id", "pin_id", "ino_pin_num"],
                "gpio_has_pin",
                &[gpio_id.to_string(), pin_id.to_string(), ino.to_string()],
                true,
            )?;
        }
        Ok(())
    }

    /// `add pin2soc <soc> [pin]`
    fn add_pin2soc(&mut self, values: &[String]) -> PidbmResult<()> {
        let soc_id = self.resolve_required("soc", &values[0])?;
        let soc_name = self
            .engine()
            .select_where(&["name".to_string()], "soc", "id", &soc_id.to_string())?
            .first()
            .map(|r| r[0].clone())
            .unwrap_or_default();

        let mut pins: Vec<i64> = Vec::new();

        if values.len() < 2 {
            println!("-- Adds pins to the {soc_name} SoC (id:{soc_id}) --");
            println!("Enter the pin one by one then ENTER, press [q/Q] to exit.");

            loop {
                let line = match self.reader.read_line("? ")? {
                    Some(line) => line,
                    None => break,
                };
                let token = line.trim();
                if prompt::is_quit(token) {
                    break;
                }
                if token.is_empty() {
                    continue;
                }
                match resolver::find_pin(self.db, token)? {
                    Some(pin_id) => pins.push(pin_id),
                    None => println!("pin {token} not found !"),
                }
            }
        } else {
            match resolver::find_pin(self.db, &values[1])? {
                Some(pin_id) => pins.push(pin_id),
                None => println!("pin {} not found !", values[1]),
            }
        }

        let engine = self.engine();
        for pin_id in pins {
            engine.insert(
                &["pin_id", "soc_id"],
                "soc_has_pin",
                &[pin_id.to_string(), soc_id.to_string()],
                true,
            )?;
        }
        Ok(())
    }

    /// `add pin2con <connector> [row [col] pin]`
    ///
    /// Without a position, fills the grid row by row from the operator:
    /// each input line carries one pin per column, separated by spaces or
    /// commas, and the filled grid is printed at the end.
    fn add_pin2con(&mut self, values: &[String]) -> PidbmResult<()> {
        let connector_id = self.resolve_required("connector", &values[0])?;
        let connector = Connector::load(self.db, connector_id)?;

        if values.len() >= 3 {
            let row = resolver::parse_integer(&values[1])
                .ok_or_else(|| PidbmError::invalid(format!("{} invalid row.", values[1])))?;

            let (column, pin_token) = if values.len() >= 4 && connector.columns() > 1 {
                let column = resolver::parse_integer(&values[2]).ok_or_else(|| {
                    PidbmError::invalid(format!("{} invalid column.", values[2]))
                })?;
                (column, &values[3])
            } else {
                (1, &values[2])
            };

            let pin_id = resolver::find_pin(self.db, pin_token)?
                .ok_or_else(|| PidbmError::invalid(format!("pin {pin_token} not found !")))?;
            connector.update_pin(self.db, row, column, pin_id)?;
            return Ok(());
        }

        let columns = connector.columns();
        let colwidth = connector
            .pin_number(connector.rows(), columns)
            .to_string()
            .len();

        println!(
            "-- Adds pins to the {} {}x{} connector (id:{connector_id}) --",
            connector.name(),
            connector.rows(),
            columns
        );
        println!(
            "Enter the pin identifiers of the pin numbers (opposite) separated by space or comma \
             then ENTER, press [q/Q] to exit."
        );

        let mut row = 1;
        'grid: while row <= connector.rows() {
            let mut prompt_text = String::new();
            for column in 1..=columns {
                let num = connector.pin_number(row, column);
                prompt_text.push_str(&format!("| {num:<colwidth$} "));
            }
            prompt_text.push_str("| ? ");

            let line = match self.reader.read_line(&prompt_text)? {
                Some(line) => line,
                None => break,
            };
            if prompt::is_quit(line.trim()) {
                break;
            }

            let tokens: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
                .collect();
            if tokens.len() != columns as usize {
                println!("expected {columns} pins, got {}.", tokens.len());
                continue;
            }

            let mut row_pins = Vec::new();
            for token in &tokens {
                match resolver::find_pin(self.db, token)? {
                    Some(pin_id) => row_pins.push(pin_id),
                    None => {
                        println!("pin {token} not found !");
                        continue 'grid;
                    }
                }
            }

            for (i, pin_id) in row_pins.iter().enumerate() {
                connector.update_pin(self.db, row, i as i64 + 1, *pin_id)?;
            }
            row += 1;
        }

        // reload to render the freshly written grid
        print!("{}", Connector::load(self.db, connector_id)?);
        Ok(())
    }

    /// `add connector <name> <family> <rows>`
    fn add_connector(&mut self, values: &[String]) -> PidbmResult<()> {
        let family_id = self.resolve_required("connector_family", &values[1])?;
        if resolver::parse_integer(&values[2]).is_none() {
            return Err(PidbmError::invalid(format!(
                "{} invalid row count.",
                values[2]
            )));
        }
        self.add_simple(
            "connector",
            &["connector_family_id", "name", "rows"],
            vec![family_id.to_string(), values[0].clone(), values[2].clone()],
            false,
        )
    }

    /// `add gpio <name> <board_family>`
    fn add_gpio(&mut self, values: &[String]) -> PidbmResult<()> {
        let family_id = self.resolve_required("board_family", &values[1])?;
        self.add_simple(
            "gpio",
            &["name", "board_family_id"],
            vec![values[0].clone(), family_id.to_string()],
            true,
        )
    }

    /// `add con2gpio <gpio> <num> <connector>`
    fn add_con2gpio(&mut self, values: &[String]) -> PidbmResult<()> {
        let gpio_id = self.resolve_required("gpio", &values[0])?;
        if resolver::parse_integer(&values[1]).is_none() {
            return Err(PidbmError::invalid(format!(
                "{} invalid connector number.",
                values[1]
            )));
        }
        let connector_id = self.resolve_required("connector", &values[2])?;
        self.add_simple(
            "gpio_has_connector",
            &["gpio_id", "num", "connector_id"],
            vec![
                gpio_id.to_string(),
                values[1].clone(),
                connector_id.to_string(),
            ],
            true,
        )
    }

    /// `add board_model <name> <board_family> <soc>`
    fn add_board_model(&mut self, values: &[String]) -> PidbmResult<()> {
        let family_id = self.resolve_required("board_family", &values[1])?;
        let soc_id = self.resolve_required("soc", &values[2])?;
        self.add_simple(
            "board_model",
            &["name", "board_family_id", "soc_id"],
            vec![
                values[0].clone(),
                family_id.to_string(),
                soc_id.to_string(),
            ],
            true,
        )
    }

    /// `add board <name> <model> <gpio> <manufacturer> <i2c> <spi> <uart>`
    ///
    /// Requires exactly one of `-r` (revision, hex accepted) or `-t`
    /// (tag); the matching `revision`/`tag` row is inserted after the
    /// board row.
    fn add_board(&mut self, values: &[String]) -> PidbmResult<()> {
        let has_revision = self.config.revision().is_some();
        let has_tag = self.config.tag().is_some();
        if has_revision == has_tag {
            return Err(PidbmError::invalid(
                "You must provide a revision with -r OR tag with -t to add a board.",
            ));
        }

        // revision validity is checked before anything is written
        let revision = match self.config.revision() {
            Some(text) => Some(resolver::parse_integer(text).ok_or_else(|| {
                PidbmError::invalid(format!("{text} invalid revision."))
            })?),
            None => None,
        };

        let model_id = self.resolve_required("board_model", &values[1])?;
        let gpio_id = self.resolve_required("gpio", &values[2])?;
        let manufacturer_id = self.resolve_required("manufacturer", &values[3])?;

        let mut columns = vec![
            "name",
            "board_model_id",
            "gpio_id",
            "manufacturer_id",
            "default_i2c_id",
            "default_spi_id",
            "default_uart_id",
        ];
        let mut row = vec![
            values[0].clone(),
            model_id.to_string(),
            gpio_id.to_string(),
            manufacturer_id.to_string(),
            values[4].clone(),
            values[5].clone(),
            values[6].clone(),
        ];

        if let Some(memory) = self.config.memory() {
            columns.push("ram");
            row.push(memory.to_string());
        }
        if let Some(pcb) = self.config.pcb() {
            columns.push("pcb_revision");
            row.push(pcb.to_string());
        }

        let engine = self.engine();
        let board_id = engine.insert(&columns, "board", &row, false)?;

        if let Some(revision) = revision {
            engine.insert(
                &["board_id", "revision"],
                "revision",
                &[board_id.to_string(), revision.to_string()],
                false,
            )?;
        } else if let Some(tag) = self.config.tag() {
            engine.insert(
                &["board_id", "tag"],
                "tag",
                &[board_id.to_string(), tag.to_string()],
                false,
            )?;
        }

        if !self.quiet() {
            println!("1 record added to board (id:{board_id}).");
        }
        Ok(())
    }

    // -----------------------------------------------------------------
    // mod

    /// `mod <view> <id|name> <new values...>`
    ///
    /// Replacement values are assigned to the view's columns in
    /// projection order, skipping the leading id; fewer values than
    /// columns updates a prefix.
    fn modify(&mut self, args: &[String]) -> PidbmResult<()> {
        let to = args
            .get(1)
            .ok_or_else(|| PidbmError::invalid("no argument provided"))?
            .clone();

        if !MOD_VIEWS.contains(&to.as_str()) {
            return Err(PidbmError::invalid(format!("invalid table {to}")));
        }
        if args.len() <= 3 {
            return Err(PidbmError::invalid(format!(
                "nothing data provided to modify {to}"
            )));
        }

        let id = self.resolve_required(&to, &args[2])?;
        let what = Self::what_vec(&to);
        let columns = &what[1..];
        let values: Vec<String> = args[3..].to_vec();

        if values.len() > columns.len() {
            return Err(PidbmError::invalid(format!(
                "too many values to modify {to}, {} at most",
                columns.len()
            )));
        }

        let mut predicate = Predicate::new();
        predicate.push("id", CompareOp::Eq, id.to_string());
        self.engine()
            .update(&columns[..values.len()], &to, predicate, values)?;
        Ok(())
    }

    // -----------------------------------------------------------------
    // rm

    /// `rm <view> <id|name>`
    ///
    /// Board deletion explicitly cascades to dependent `revision` and
    /// `tag` rows once confirmed; the storage layer enforces no foreign
    /// keys. The statements are independent, an interruption can leave a
    /// partial deletion.
    fn remove(&mut self, args: &[String]) -> PidbmResult<()> {
        let from = args
            .get(1)
            .ok_or_else(|| PidbmError::invalid("no command provided"))?
            .clone();
        let token = args
            .get(2)
            .ok_or_else(|| PidbmError::invalid("Could you tell me what to erase ?"))?;

        let condition = resolver::where_condition(token, None);

        if from == "board" {
            let mut predicate = Predicate::new();
            condition.apply_to(&mut predicate);

            let boards = self
                .engine()
                .select(&["id".to_string()], "board", &predicate, None, None)?;
            if boards.is_empty() {
                return Ok(());
            }

            let confirmed = if self.quiet() {
                true
            } else {
                let n = render::print_records(
                    self.db,
                    &Self::what_vec("board"),
                    "board",
                    &predicate,
                    None,
                    None,
                )?;
                prompt::confirm(
                    self.reader,
                    &format!("Could you confirm the deletion of the {n} records above [y/N] ? "),
                )?
            };

            if confirmed {
                let engine = self.engine();
                for board in &boards {
                    engine.delete_where("revision", "board_id", &board[0])?;
                    engine.delete_where("tag", "board_id", &board[0])?;
                }
                engine.delete_matching("board", &predicate)?;
            }
            Ok(())
        } else if RM_VIEWS.contains(&from.as_str()) {
            let engine = Engine::new(self.db, &self.config);
            engine.delete(&Self::what_vec(&from), &from, &condition, self.reader)
        } else {
            Err(PidbmError::invalid(format!("invalid table {from}")))
        }
    }

    // -----------------------------------------------------------------
    // cp

    /// `cp connector <src> <new_name>` / `cp soc <src> <new_name>`
    fn copy(&mut self, args: &[String]) -> PidbmResult<()> {
        let to = args
            .get(1)
            .ok_or_else(|| PidbmError::invalid("no argument provided"))?
            .clone();

        if to != "connector" && to != "soc" {
            return Err(PidbmError::invalid(format!("invalid item {to}")));
        }
        if args.len() < 4 {
            return Err(PidbmError::invalid(format!(
                "new name required to copy a {to}"
            )));
        }

        let id = self.resolve_required(&to, &args[2])?;
        let new_name = &args[3];

        match to.as_str() {
            "connector" => {
                let src = Connector::load(self.db, id)?;
                let dst = Connector::copy(&src, self.db, new_name)?;
                if !self.quiet() {
                    println!(
                        "{} connector (id:{}) copied to {} connector (id:{}).",
                        src.name(),
                        src.id(),
                        dst.name(),
                        dst.id()
                    );
                }
            }
            _ => {
                let src = Soc::load(self.db, id)?;
                let dst = Soc::copy(&src, self.db, new_name)?;
                if !self.quiet() {
                    println!(
                        "{} soc (id:{}) copied to {} soc (id:{}).",
                        src.name(),
                        src.id(),
                        dst.name(),
                        dst.id()
                    );
                }
            }
        }
        Ok(())
    }
}
