use std::time::{Duration, Instant};

use crate::constants;
use crate::controller::{Controller, FetchState, Mode};
use crate::location::LocationUpdate;
use crate::router::Route;
use crate::theme::{ColorScheme, Theme};
use crate::types::AppEvent;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct App {
    quit: bool,
    fps: u32,
    project_address: String,
    colors: ColorScheme,

    controller: Controller,
    input_mode: InputMode,
    search_pushed: bool,           // first keystroke of a search session pushes, later ones replace

    selection: usize,              // row in the browse list
    spinner_idx: usize,

    toast_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(fps: u32, project_address: String, theme: Theme, controller: Controller) -> Self {
        Self {
            quit: false,
            fps,
            project_address,
            colors: theme.colors(),
            controller,
            input_mode: InputMode::Normal,
            search_pushed: false,
            selection: 0,
            spinner_idx: 0,
            toast_message: None,
        }
    }

    // ----- getters -----
    pub fn fps(&self) -> u32 { self.fps }
    pub fn quit_flag(&self) -> bool { self.quit }
    pub fn input_mode(&self) -> InputMode { self.input_mode }
    pub fn project_address(&self) -> &str { &self.project_address }
    pub fn theme(&self) -> &ColorScheme { &self.colors }
    pub fn search_term(&self) -> &str { self.controller.search_term() }
    pub fn selection(&self) -> usize { self.selection }
    pub fn spinner(&self) -> &'static str { SPINNER[self.spinner_idx % SPINNER.len()] }
    pub fn route(&self) -> &Route { self.controller.location().current() }
    pub fn href(&self) -> String { self.controller.location().href() }
    pub fn state(&self) -> FetchState<'_> { self.controller.current_state() }
    pub fn controller(&self) -> &Controller { &self.controller }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast_message.as_ref().and_then(|(msg, at)| {
            if at.elapsed() < Duration::from_secs(constants::ui::TOAST_DURATION_SECS) {
                Some(msg.as_str())
            } else {
                None
            }
        })
    }

    pub fn show_toast(&mut self, msg: impl Into<String>) {
        self.toast_message = Some((msg.into(), Instant::now()));
    }

    pub fn tick_spinner(&mut self) {
        let s = self.state();
        if s.is_fetching || s.is_fetching_next_page {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn quit(&mut self) { self.quit = true; }

    // ----- fetch results -----
    pub fn on_event(&mut self, ev: AppEvent) {
        self.controller.on_event(ev);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let count = self.state().item_count();
        if count == 0 {
            self.selection = 0;
        } else if self.selection >= count {
            self.selection = count - 1;
        }
    }

    // ----- search box -----
    pub fn begin_search(&mut self) {
        if *self.route() == Route::Home {
            self.open_project();
        }
        self.input_mode = InputMode::Search;
        self.search_pushed = false;
    }

    pub fn end_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    fn write_search(&mut self, term: &str) {
        let update = if self.search_pushed { LocationUpdate::Replace } else { LocationUpdate::Push };
        self.search_pushed = true;
        self.controller.set_search_term(term, update);
        self.selection = 0;
    }

    pub fn search_input(&mut self, c: char) {
        let term = format!("{}{}", self.search_term(), c);
        self.write_search(&term);
    }

    pub fn search_backspace(&mut self) {
        let mut term = self.search_term().to_string();
        if term.pop().is_some() {
            self.write_search(&term);
        }
    }

    pub fn clear_search(&mut self) {
        if !self.search_term().is_empty() {
            self.controller.set_search_term("", LocationUpdate::Push);
            self.selection = 0;
        }
    }

    // ----- browse list -----
    /// Moving past the last row asks for the next page
    pub fn select_next(&mut self) {
        if self.controller.mode() != Mode::Browse {
            return;
        }
        let count = self.state().item_count();
        if self.selection + 1 < count {
            self.selection += 1;
        } else if self.state().can_fetch_next_page() {
            self.controller.fetch_next_page();
        }
    }

    pub fn select_prev(&mut self) {
        self.selection = self.selection.saturating_sub(1);
    }

    pub fn page_down(&mut self, rows: usize) {
        for _ in 0..rows.max(1) {
            self.select_next();
        }
    }

    pub fn page_up(&mut self, rows: usize) {
        self.selection = self.selection.saturating_sub(rows.max(1));
    }

    pub fn load_more(&mut self) {
        if self.controller.fetch_next_page() {
            return;
        }
        let s = self.state();
        if s.mode == Mode::Browse && !s.has_next_page && !s.pages.is_empty() {
            self.show_toast(constants::messages::NOTHING_MORE);
        }
    }

    // ----- navigation -----
    fn navigate(&mut self, route: Route) {
        self.controller.location_mut().navigate(route, LocationUpdate::Push);
        self.after_navigation();
    }

    fn after_navigation(&mut self) {
        self.controller.sync_from_location();
        self.input_mode = InputMode::Normal;
        self.clamp_selection();
    }

    pub fn open_project(&mut self) {
        if *self.route() == Route::Home {
            self.navigate(Route::project());
        }
    }

    pub fn go_home(&mut self) {
        self.navigate(Route::Home);
    }

    pub fn back(&mut self) {
        if self.controller.location_mut().back() {
            self.after_navigation();
        } else {
            self.show_toast("No earlier page");
        }
    }

    pub fn forward(&mut self) {
        if self.controller.location_mut().forward() {
            self.after_navigation();
        } else {
            self.show_toast("No later page");
        }
    }
}
