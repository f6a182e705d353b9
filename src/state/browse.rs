use crate::model::{
    self, Fuel, Listing, Transmission, BRANDS, BUDGET_RANGES, CATEGORIES, KM_DRIVEN_RANGES, LOCATIONS, MODELS,
    OWNER_OPTIONS, POPULAR_CITIES,
};
use chrono::{DateTime, Utc};
use std::cmp::Reverse;

/// Listing cards per row in the grid.
pub const GRID_COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomePane {
    Navbar,
    Filters,
    Listings,
}

impl HomePane {
    pub fn next(self) -> Self {
        match self {
            HomePane::Navbar => HomePane::Filters,
            HomePane::Filters => HomePane::Listings,
            HomePane::Listings => HomePane::Navbar,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            HomePane::Navbar => HomePane::Listings,
            HomePane::Filters => HomePane::Navbar,
            HomePane::Listings => HomePane::Filters,
        }
    }
}

// --- Navbar ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavItem {
    Location,
    Search,
    Sell,
    Account,
}

impl NavItem {
    pub const ALL: [NavItem; 4] = [NavItem::Location, NavItem::Search, NavItem::Sell, NavItem::Account];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavbarAction {
    None,
    Sell,
    Logout,
}

/// Entries in the account dropdown.
pub const ACCOUNT_MENU: &[&str] = &["Logout"];

#[derive(Debug)]
pub struct NavbarState {
    pub city: String,
    pub search: String,
    pub focus: NavItem,
    pub location_open: bool,
    pub account_open: bool,
    pub dropdown_selected: usize,
}

impl NavbarState {
    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            search: String::new(),
            focus: NavItem::Search,
            location_open: false,
            account_open: false,
            dropdown_selected: 0,
        }
    }

    pub fn dropdown_open(&self) -> bool {
        self.location_open || self.account_open
    }

    pub fn close_dropdowns(&mut self) {
        self.location_open = false;
        self.account_open = false;
    }

    pub fn focus_next(&mut self) {
        let idx = NavItem::ALL.iter().position(|i| *i == self.focus).unwrap_or(0);
        self.focus = NavItem::ALL[(idx + 1) % NavItem::ALL.len()];
    }

    pub fn focus_prev(&mut self) {
        let idx = NavItem::ALL.iter().position(|i| *i == self.focus).unwrap_or(0);
        self.focus = NavItem::ALL[(idx + NavItem::ALL.len() - 1) % NavItem::ALL.len()];
    }

    fn dropdown_len(&self) -> usize {
        if self.location_open {
            POPULAR_CITIES.len()
        } else if self.account_open {
            ACCOUNT_MENU.len()
        } else {
            0
        }
    }

    pub fn dropdown_up(&mut self) {
        let len = self.dropdown_len();
        if len > 0 {
            self.dropdown_selected = (self.dropdown_selected + len - 1) % len;
        }
    }

    pub fn dropdown_down(&mut self) {
        let len = self.dropdown_len();
        if len > 0 {
            self.dropdown_selected = (self.dropdown_selected + 1) % len;
        }
    }

    /// Enter on the focused item: opens a dropdown, picks from an open one,
    /// or reports an action for the app to carry out.
    pub fn activate(&mut self) -> NavbarAction {
        if self.location_open {
            if let Some(city) = POPULAR_CITIES.get(self.dropdown_selected) {
                self.city = city.to_string();
            }
            self.close_dropdowns();
            return NavbarAction::None;
        }
        if self.account_open {
            let picked = ACCOUNT_MENU.get(self.dropdown_selected).copied();
            self.close_dropdowns();
            return match picked {
                Some("Logout") => NavbarAction::Logout,
                _ => NavbarAction::None,
            };
        }
        match self.focus {
            NavItem::Location => {
                self.location_open = true;
                self.dropdown_selected = POPULAR_CITIES.iter().position(|c| *c == self.city).unwrap_or(0);
                NavbarAction::None
            }
            NavItem::Account => {
                self.account_open = true;
                self.dropdown_selected = 0;
                NavbarAction::None
            }
            NavItem::Sell => NavbarAction::Sell,
            NavItem::Search => NavbarAction::None,
        }
    }
}

// --- Filter sidebar ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Category,
    Location,
    Brand,
    Model,
    Budget,
    Year,
    Owners,
    KmDriven,
    Fuel,
    Transmission,
}

impl FilterKind {
    pub const ALL: [FilterKind; 10] = [
        FilterKind::Category,
        FilterKind::Location,
        FilterKind::Brand,
        FilterKind::Model,
        FilterKind::Budget,
        FilterKind::Year,
        FilterKind::Owners,
        FilterKind::KmDriven,
        FilterKind::Fuel,
        FilterKind::Transmission,
    ];

    pub fn title(self) -> &'static str {
        match self {
            FilterKind::Category => "Categories",
            FilterKind::Location => "Location",
            FilterKind::Brand => "Brand",
            FilterKind::Model => "Model",
            FilterKind::Budget => "Budget",
            FilterKind::Year => "Year",
            FilterKind::Owners => "No. of Owners",
            FilterKind::KmDriven => "KM Driven",
            FilterKind::Fuel => "Fuel Type",
            FilterKind::Transmission => "Transmission",
        }
    }

    pub fn option_count(self) -> usize {
        match self {
            FilterKind::Category => CATEGORIES.len(),
            FilterKind::Location => LOCATIONS.len(),
            FilterKind::Brand => BRANDS.len(),
            FilterKind::Model => MODELS.len(),
            FilterKind::Budget => BUDGET_RANGES.len(),
            FilterKind::Year => model::years().count(),
            FilterKind::Owners => OWNER_OPTIONS.len(),
            FilterKind::KmDriven => KM_DRIVEN_RANGES.len(),
            FilterKind::Fuel => Fuel::ALL.len(),
            FilterKind::Transmission => Transmission::ALL.len(),
        }
    }

    /// Plain label of one option, as listed among the active filters.
    pub fn option_label(self, index: usize) -> String {
        let label = match self {
            FilterKind::Category => CATEGORIES.get(index).map(|c| c.name.to_string()),
            FilterKind::Location => LOCATIONS.get(index).map(|s| s.to_string()),
            FilterKind::Brand => BRANDS.get(index).map(|s| s.to_string()),
            FilterKind::Model => MODELS.get(index).map(|s| s.to_string()),
            FilterKind::Budget => BUDGET_RANGES.get(index).map(|b| b.0.to_string()),
            FilterKind::Year => model::years().nth(index).map(|y| y.to_string()),
            FilterKind::Owners => OWNER_OPTIONS.get(index).map(|o| o.0.to_string()),
            FilterKind::KmDriven => KM_DRIVEN_RANGES.get(index).map(|k| k.0.to_string()),
            FilterKind::Fuel => Fuel::ALL.get(index).map(|f| f.label().to_string()),
            FilterKind::Transmission => Transmission::ALL.get(index).map(|t| t.label().to_string()),
        };
        label.unwrap_or_default()
    }

    /// Whether `listing` satisfies option `index` of this filter.
    fn accepts(self, index: usize, listing: &Listing) -> bool {
        let vehicle = listing.vehicle.as_ref();
        match self {
            FilterKind::Category => CATEGORIES.get(index).is_some_and(|c| c.id == listing.category),
            FilterKind::Location => LOCATIONS.get(index).is_some_and(|l| *l == listing.location),
            FilterKind::Budget => BUDGET_RANGES
                .get(index)
                .is_some_and(|(_, min, max)| listing.price >= *min && listing.price < *max),
            FilterKind::Brand => vehicle.zip(BRANDS.get(index)).is_some_and(|(v, b)| v.brand == *b),
            FilterKind::Model => vehicle.zip(MODELS.get(index)).is_some_and(|(v, m)| v.model == *m),
            FilterKind::Year => vehicle.zip(model::years().nth(index)).is_some_and(|(v, y)| v.year == y),
            FilterKind::Owners => vehicle
                .zip(OWNER_OPTIONS.get(index))
                .is_some_and(|(v, (_, min, max))| v.owners >= *min && v.owners <= *max),
            FilterKind::KmDriven => vehicle
                .zip(KM_DRIVEN_RANGES.get(index))
                .is_some_and(|(v, (_, min, max))| v.km_driven >= *min && v.km_driven < *max),
            FilterKind::Fuel => vehicle.zip(Fuel::ALL.get(index)).is_some_and(|(v, f)| v.fuel == *f),
            FilterKind::Transmission => vehicle
                .zip(Transmission::ALL.get(index))
                .is_some_and(|(v, t)| v.transmission == *t),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSection {
    pub kind: FilterKind,
    pub expanded: bool,
    pub selected: Option<usize>,
}

/// One line of the sidebar as drawn, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRow {
    ClearAll,
    Header(usize),
    Option(usize, usize),
}

#[derive(Debug)]
pub struct FilterState {
    pub sections: Vec<FilterSection>,
    pub cursor: usize,
}

impl Default for FilterState {
    fn default() -> Self {
        let sections = FilterKind::ALL
            .iter()
            .map(|&kind| FilterSection {
                kind,
                expanded: kind == FilterKind::Category,
                selected: None,
            })
            .collect();
        Self { sections, cursor: 0 }
    }
}

impl FilterState {
    pub fn rows(&self) -> Vec<FilterRow> {
        let mut rows = vec![FilterRow::ClearAll];
        for (s, section) in self.sections.iter().enumerate() {
            rows.push(FilterRow::Header(s));
            if section.expanded {
                rows.extend((0..section.kind.option_count()).map(|o| FilterRow::Option(s, o)));
            }
        }
        rows
    }

    pub fn cursor_row(&self) -> Option<FilterRow> {
        self.rows().get(self.cursor).copied()
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let last = self.rows().len().saturating_sub(1);
        self.cursor = (self.cursor + 1).min(last);
    }

    /// Enter on the current row. Returns whether the active filters changed.
    pub fn activate(&mut self) -> bool {
        match self.cursor_row() {
            Some(FilterRow::ClearAll) => {
                self.clear_all();
                true
            }
            Some(FilterRow::Header(s)) => {
                self.toggle_section(s);
                false
            }
            Some(FilterRow::Option(s, o)) => {
                self.select(s, o);
                true
            }
            None => false,
        }
    }

    pub fn toggle_section(&mut self, section: usize) {
        if let Some(s) = self.sections.get_mut(section) {
            s.expanded = !s.expanded;
        }
        let last = self.rows().len().saturating_sub(1);
        self.cursor = self.cursor.min(last);
    }

    /// Picking the option that is already selected clears it.
    pub fn select(&mut self, section: usize, option: usize) {
        if let Some(s) = self.sections.get_mut(section) {
            s.selected = if s.selected == Some(option) { None } else { Some(option) };
        }
    }

    pub fn clear_all(&mut self) {
        for section in &mut self.sections {
            section.selected = None;
        }
    }

    pub fn active(&self) -> Vec<(FilterKind, String)> {
        self.sections
            .iter()
            .filter_map(|s| s.selected.map(|o| (s.kind, s.kind.option_label(o))))
            .collect()
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.sections
            .iter()
            .all(|s| match s.selected {
                Some(o) => s.kind.accepts(o, listing),
                None => true,
            })
    }
}

// --- Listings ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Relevance,
    PriceLowHigh,
    PriceHighLow,
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Relevance => "Relevance",
            SortOrder::PriceLowHigh => "Price: Low to High",
            SortOrder::PriceHighLow => "Price: High to Low",
            SortOrder::Newest => "Newest First",
            SortOrder::Oldest => "Oldest First",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortOrder::Relevance => SortOrder::PriceLowHigh,
            SortOrder::PriceLowHigh => SortOrder::PriceHighLow,
            SortOrder::PriceHighLow => SortOrder::Newest,
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Relevance,
        }
    }

    fn apply(self, listings: &mut [&Listing]) {
        match self {
            SortOrder::Relevance => {}
            SortOrder::PriceLowHigh => listings.sort_by_key(|l| l.price),
            SortOrder::PriceHighLow => listings.sort_by_key(|l| Reverse(l.price)),
            SortOrder::Newest => listings.sort_by_key(|l| Reverse(l.posted_at)),
            SortOrder::Oldest => listings.sort_by_key(|l| l.posted_at),
        }
    }
}

/// The signed-in home screen: navbar, filter sidebar and listing grid.
#[derive(Debug)]
pub struct HomeState {
    pub pane: HomePane,
    pub navbar: NavbarState,
    pub filters: FilterState,
    pub sort: SortOrder,
    pub selected: usize,
    listings: Vec<Listing>,
}

impl HomeState {
    pub fn new(city: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_listings(city, model::catalogue(now))
    }

    pub fn with_listings(city: impl Into<String>, listings: Vec<Listing>) -> Self {
        Self {
            pane: HomePane::Listings,
            navbar: NavbarState::new(city),
            filters: FilterState::default(),
            sort: SortOrder::Relevance,
            selected: 0,
            listings,
        }
    }

    pub fn visible_listings(&self) -> Vec<&Listing> {
        let query = self.navbar.search.trim().to_lowercase();
        let mut visible: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|l| self.filters.matches(l))
            .filter(|l| query.is_empty() || l.title.to_lowercase().contains(&query))
            .collect();
        self.sort.apply(&mut visible);
        visible
    }

    pub fn selected_listing(&self) -> Option<&Listing> {
        self.visible_listings().get(self.selected).copied()
    }

    /// Keeps the grid selection inside the visible set after it shrinks.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_listings().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn move_selection(&mut self, dx: isize, dy: isize) {
        let len = self.visible_listings().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let cols = GRID_COLUMNS as isize;
        let target = self.selected as isize + dx + dy * cols;
        if (0..len as isize).contains(&target) {
            self.selected = target as usize;
        }
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
        self.selected = 0;
    }

    pub fn search_push(&mut self, c: char) {
        self.navbar.search.push(c);
        self.selected = 0;
    }

    pub fn search_pop(&mut self) {
        self.navbar.search.pop();
        self.selected = 0;
    }

    pub fn activate_filter(&mut self) {
        if self.filters.activate() {
            self.clamp_selection();
        }
    }
}
