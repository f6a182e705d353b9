use crate::services::otp::OtpCode;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

// --- Auth Data Structures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthProvider {
    Otp,
    Signup,
    Google,
    Facebook,
    Demo,
}

/// The user handed to the shell after any successful auth flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub provider: AuthProvider,
}

impl AuthenticatedUser {
    pub fn social(provider: AuthProvider) -> Self {
        let (name, email) = match provider {
            AuthProvider::Google => ("Google User", "user@gmail.com"),
            AuthProvider::Facebook => ("Facebook User", "user@facebook.com"),
            _ => ("Demo User", "demo@example.com"),
        };
        Self {
            name: name.to_string(),
            email: email.to_string(),
            contact: None,
            username: None,
            profile_image: None,
            provider,
        }
    }

    pub fn demo() -> Self {
        Self::social(AuthProvider::Demo)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub contact: String,
    pub password: String,
}

/// Lives from a completed dispatch until the login flow exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpChallenge {
    pub code: OtpCode,
    pub destination: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    pub dimensions: Option<(u32, u32)>,
    /// `data:<mime>;base64,...`
    pub preview: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub contact: String,
    pub username: String,
    pub profile_image: Option<ProfileImage>,
    pub password: String,
    pub confirm_password: String,
}

// --- Catalogue Data Structures ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// gemoji shortcode, resolved through the `emojis` crate when drawn
    pub icon: &'static str,
    pub count: u32,
}

impl Category {
    pub fn icon(&self) -> &'static str {
        emojis::get_by_shortcode(self.icon).map_or("•", |e| e.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fuel {
    Petrol,
    Diesel,
    Cng,
    Electric,
    Hybrid,
}

impl Fuel {
    pub const ALL: [Fuel; 5] = [Fuel::Petrol, Fuel::Diesel, Fuel::Cng, Fuel::Electric, Fuel::Hybrid];

    pub fn label(&self) -> &'static str {
        match self {
            Fuel::Petrol => "Petrol",
            Fuel::Diesel => "Diesel",
            Fuel::Cng => "CNG",
            Fuel::Electric => "Electric",
            Fuel::Hybrid => "Hybrid",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transmission {
    Manual,
    Automatic,
    Cvt,
}

impl Transmission {
    pub const ALL: [Transmission; 3] = [Transmission::Manual, Transmission::Automatic, Transmission::Cvt];

    pub fn label(&self) -> &'static str {
        match self {
            Transmission::Manual => "Manual",
            Transmission::Automatic => "Automatic",
            Transmission::Cvt => "CVT",
        }
    }
}

/// Vehicle details; absent for phones, furniture and the like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleDetails {
    pub brand: &'static str,
    pub model: &'static str,
    pub year: u16,
    pub km_driven: u32,
    pub owners: u8,
    pub fuel: Fuel,
    pub transmission: Transmission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: Uuid,
    pub title: String,
    /// Whole rupees
    pub price: u64,
    pub category: &'static str,
    pub location: &'static str,
    pub vehicle: Option<VehicleDetails>,
    pub posted_at: DateTime<Utc>,
}

// --- Mock Data ---

pub const CATEGORIES: &[Category] = &[
    Category { id: "cars", name: "Cars", icon: "car", count: 1245 },
    Category { id: "bikes", name: "Bikes", icon: "motorcycle", count: 856 },
    Category { id: "mobile", name: "Mobile Phones", icon: "iphone", count: 2341 },
    Category { id: "electronics", name: "Electronics", icon: "computer", count: 1567 },
    Category { id: "furniture", name: "Furniture", icon: "chair", count: 743 },
    Category { id: "fashion", name: "Fashion", icon: "shirt", count: 1890 },
    Category { id: "books", name: "Books", icon: "books", count: 456 },
    Category { id: "sports", name: "Sports", icon: "soccer", count: 234 },
    Category { id: "real-estate", name: "Real Estate", icon: "house", count: 567 },
    Category { id: "jobs", name: "Jobs", icon: "briefcase", count: 890 },
];

pub const LOCATIONS: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Kolkata",
    "Pune", "Ahmedabad", "Jaipur", "Surat", "Lucknow", "Kanpur",
];

/// Cities offered in the navbar location dropdown.
pub const POPULAR_CITIES: &[&str] = &[
    "Mumbai", "Delhi", "Bangalore", "Hyderabad", "Chennai", "Kolkata", "Pune", "Ahmedabad",
];

pub const BRANDS: &[&str] = &[
    "Maruti Suzuki", "Hyundai", "Mahindra", "Tata", "Honda", "Toyota",
    "Ford", "Chevrolet", "Renault", "Nissan", "Volkswagen", "BMW", "Hero", "Bajaj", "Royal Enfield",
];

pub const MODELS: &[&str] = &[
    "Swift", "Alto", "i20", "Verna", "City", "Amaze", "Innova",
    "Fortuner", "XUV500", "Scorpio", "Nexon", "Tiago", "Splendor Plus", "Pulsar 150", "Classic 350",
];

/// (label, min inclusive, max exclusive)
pub const BUDGET_RANGES: &[(&str, u64, u64)] = &[
    ("Under ₹50,000", 0, 50_000),
    ("₹50,000 - ₹1,00,000", 50_000, 100_000),
    ("₹1,00,000 - ₹2,00,000", 100_000, 200_000),
    ("₹2,00,000 - ₹5,00,000", 200_000, 500_000),
    ("₹5,00,000 - ₹10,00,000", 500_000, 1_000_000),
    ("Above ₹10,00,000", 1_000_000, u64::MAX),
];

/// (label, min owners, max owners inclusive)
pub const OWNER_OPTIONS: &[(&str, u8, u8)] = &[
    ("1st Owner", 1, 1),
    ("2nd Owner", 2, 2),
    ("3rd Owner", 3, 3),
    ("4th Owner", 4, 4),
    ("5+ Owners", 5, u8::MAX),
];

/// (label, min km inclusive, max km exclusive)
pub const KM_DRIVEN_RANGES: &[(&str, u32, u32)] = &[
    ("Under 10,000 km", 0, 10_000),
    ("10,000 - 20,000 km", 10_000, 20_000),
    ("20,000 - 40,000 km", 20_000, 40_000),
    ("40,000 - 60,000 km", 40_000, 60_000),
    ("60,000 - 80,000 km", 60_000, 80_000),
    ("Above 80,000 km", 80_000, u32::MAX),
];

pub const NEWEST_YEAR: u16 = 2024;
pub const YEAR_SPAN: u16 = 25;

pub fn years() -> impl Iterator<Item = u16> {
    (0..YEAR_SPAN).map(|i| NEWEST_YEAR - i)
}

pub fn category(id: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.id == id)
}

fn vehicle(
    brand: &'static str,
    model: &'static str,
    year: u16,
    km_driven: u32,
    owners: u8,
    fuel: Fuel,
    transmission: Transmission,
) -> Option<VehicleDetails> {
    Some(VehicleDetails { brand, model, year, km_driven, owners, fuel, transmission })
}

/// The fixed listing set shown on the home screen. `now` anchors the posted dates.
pub fn catalogue(now: DateTime<Utc>) -> Vec<Listing> {
    use Fuel::*;
    use Transmission::*;

    let entries: Vec<(&str, u64, &'static str, &'static str, Option<VehicleDetails>, i64)> = vec![
        ("Maruti Suzuki Swift VXI", 485_000, "cars", "Delhi", vehicle("Maruti Suzuki", "Swift", 2019, 42_000, 1, Petrol, Manual), 3),
        ("Hyundai i20 Asta", 690_000, "cars", "Mumbai", vehicle("Hyundai", "i20", 2021, 18_500, 1, Petrol, Cvt), 20),
        ("Toyota Innova 2.5 G", 1_150_000, "cars", "Bangalore", vehicle("Toyota", "Innova", 2016, 96_000, 2, Diesel, Manual), 52),
        ("Tata Nexon EV Max", 1_525_000, "cars", "Pune", vehicle("Tata", "Nexon", 2023, 8_200, 1, Electric, Automatic), 6),
        ("Honda City ZX", 920_000, "cars", "Hyderabad", vehicle("Honda", "City", 2020, 35_000, 1, Petrol, Cvt), 30),
        ("Maruti Suzuki Alto 800 LXI", 175_000, "cars", "Jaipur", vehicle("Maruti Suzuki", "Alto", 2014, 71_000, 3, Cng, Manual), 75),
        ("Mahindra Scorpio S11", 1_080_000, "cars", "Lucknow", vehicle("Mahindra", "Scorpio", 2018, 64_000, 2, Diesel, Manual), 96),
        ("Hero Splendor Plus", 45_000, "bikes", "Mumbai", vehicle("Hero", "Splendor Plus", 2020, 15_000, 1, Petrol, Manual), 12),
        ("Bajaj Pulsar 150", 62_000, "bikes", "Delhi", vehicle("Bajaj", "Pulsar 150", 2019, 27_000, 2, Petrol, Manual), 40),
        ("Royal Enfield Classic 350", 148_000, "bikes", "Chennai", vehicle("Royal Enfield", "Classic 350", 2022, 9_400, 1, Petrol, Manual), 4),
        ("iPhone 13, 128GB, Midnight", 38_500, "mobile", "Delhi", None, 2),
        ("Samsung Galaxy S21 FE", 24_000, "mobile", "Kolkata", None, 15),
        ("Dell Inspiron 15 Laptop", 32_000, "electronics", "Bangalore", None, 26),
        ("Sony Bravia 43\" Smart TV", 27_500, "electronics", "Ahmedabad", None, 49),
        ("Sheesham 3-Seater Sofa", 18_000, "furniture", "Pune", None, 60),
        ("Study Table with Drawer", 4_500, "furniture", "Surat", None, 8),
        ("Levi's Denim Jacket", 1_800, "fashion", "Mumbai", None, 33),
        ("NCERT Class 12 Book Set", 900, "books", "Kanpur", None, 110),
        ("Cosco Cricket Kit", 3_200, "sports", "Chennai", None, 18),
        ("2BHK Flat for Rent, Andheri", 35_000, "real-estate", "Mumbai", None, 1),
        ("Delivery Executive (Full Time)", 18_000, "jobs", "Hyderabad", None, 5),
    ];

    entries
        .into_iter()
        .map(|(title, price, category, location, vehicle, hours_ago)| Listing {
            id: Uuid::new_v4(),
            title: title.to_string(),
            price,
            category,
            location,
            vehicle,
            posted_at: now - Duration::hours(hours_ago),
        })
        .collect()
}

/// Formats rupees with Indian digit grouping: 1525000 -> ₹15,25,000
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    if digits.len() <= 3 {
        return format!("₹{}", digits);
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("₹{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(900, "₹900")]
    #[case(4_500, "₹4,500")]
    #[case(45_000, "₹45,000")]
    #[case(485_000, "₹4,85,000")]
    #[case(1_525_000, "₹15,25,000")]
    fn prices_use_indian_grouping(#[case] price: u64, #[case] expected: &str) {
        assert_eq!(format_price(price), expected);
    }

    #[test]
    fn catalogue_categories_exist() {
        for listing in catalogue(Utc::now()) {
            assert!(category(listing.category).is_some(), "{}", listing.category);
        }
    }

    #[test]
    fn years_cover_a_quarter_century() {
        let all: Vec<u16> = years().collect();
        assert_eq!(all.len(), 25);
        assert_eq!(all.first(), Some(&2024));
        assert_eq!(all.last(), Some(&2000));
    }

    #[test]
    fn social_users_are_fixed_mocks() {
        let google = AuthenticatedUser::social(AuthProvider::Google);
        assert_eq!(google.email, "user@gmail.com");
        assert_eq!(AuthenticatedUser::demo().name, "Demo User");
    }
}
