//! Built-in MMABooks seed dataset.
//!
//! Customers and invoices are generated from fixed tables so the dataset
//! is identical on every build and every reset.

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::SeedData;
use crate::entity::{Account, Customer, Equipment, Invoice, Product, State, Supplier};
use crate::error::DbError;

/// Number of seeded customers.
pub const CUSTOMER_COUNT: usize = 696;

/// (code, name, city)
const STATES: [(&str, &str, &str); 53] = [
    ("AK", "Alaska", "Anchorage"),
    ("AL", "Alabama", "Birmingham"),
    ("AR", "Arkansas", "Little Rock"),
    ("AZ", "Arizona", "Phoenix"),
    ("CA", "California", "Los Angeles"),
    ("CO", "Colorado", "Denver"),
    ("CT", "Connecticut", "Hartford"),
    ("DC", "District of Columbia", "Washington"),
    ("DE", "Delaware", "Wilmington"),
    ("FL", "Florida", "Miami"),
    ("GA", "Georgia", "Atlanta"),
    ("HI", "Hawaii", "Honolulu"),
    ("IA", "Iowa", "Des Moines"),
    ("ID", "Idaho", "Boise"),
    ("IL", "Illinois", "Chicago"),
    ("IN", "Indiana", "Indianapolis"),
    ("KS", "Kansas", "Wichita"),
    ("KY", "Kentucky", "Louisville"),
    ("LA", "Louisiana", "New Orleans"),
    ("MA", "Massachusetts", "Boston"),
    ("MD", "Maryland", "Baltimore"),
    ("ME", "Maine", "Portland"),
    ("MI", "Michigan", "Detroit"),
    ("MN", "Minnesota", "Minneapolis"),
    ("MO", "Missouri", "Kansas City"),
    ("MS", "Mississippi", "Jackson"),
    ("MT", "Montana", "Billings"),
    ("NC", "North Carolina", "Charlotte"),
    ("ND", "North Dakota", "Fargo"),
    ("NE", "Nebraska", "Omaha"),
    ("NH", "New Hampshire", "Manchester"),
    ("NJ", "New Jersey", "Newark"),
    ("NM", "New Mexico", "Albuquerque"),
    ("NV", "Nevada", "Las Vegas"),
    ("NY", "New York", "New York"),
    ("OH", "Ohio", "Columbus"),
    ("OK", "Oklahoma", "Tulsa"),
    ("OR", "Oregon", "Portland"),
    ("PA", "Pennsylvania", "Philadelphia"),
    ("PR", "Puerto Rico", "San Juan"),
    ("RI", "Rhode Island", "Providence"),
    ("SC", "South Carolina", "Columbia"),
    ("SD", "South Dakota", "Sioux Falls"),
    ("TN", "Tennessee", "Nashville"),
    ("TX", "Texas", "Houston"),
    ("UT", "Utah", "Salt Lake City"),
    ("VA", "Virginia", "Virginia Beach"),
    ("VI", "Virgin Islands", "Charlotte Amalie"),
    ("VT", "Vermont", "Burlington"),
    ("WA", "Washington", "Seattle"),
    ("WI", "Wisconsin", "Milwaukee"),
    ("WV", "West Virginia", "Charleston"),
    ("WY", "Wyoming", "Cheyenne"),
];

const LAST_NAMES: [&str; 24] = [
    "Abeyatunge", "Blanchard", "Chamberland", "Dominguez", "Eggleston", "Fairchild",
    "Gonzales", "Hernandez", "Isaacs", "Jablonski", "Kowalczyk", "Lindqvist",
    "Molunguri", "Nakamura", "Okonkwo", "Pemberton", "Quintero", "Rasmussen",
    "Sorensen", "Thibodeaux", "Umberger", "Valenzuela", "Whitcomb", "Yamasaki",
];

const FIRST_NAMES: [&str; 29] = [
    "Aaron", "Bernice", "Carlos", "Dana", "Edith", "Felix", "Gloria", "Hector",
    "Irene", "Jamal", "Keiko", "Lionel", "Marta", "Nolan", "Odette", "Pavel",
    "Quinn", "Rosa", "Samir", "Tessa", "Ulrich", "Vera", "Wendell", "Ximena",
    "Yusuf", "Zelda", "Amos", "Brigid", "Cyrus",
];

const STREETS: [&str; 12] = [
    "Main St", "Oak Ave", "Maple Dr", "Cedar Ln", "Pine St", "Elm St",
    "Lakeview Rd", "Hillcrest Ave", "Sunset Blvd", "River Rd", "Park Pl", "Washington St",
];

/// (code, description, unit price in cents, on hand)
const PRODUCTS: [(&str, &str, i64, i32); 16] = [
    ("A4CS", "Murach's ASP.NET 4 Web Programming with C# 2010", 5650, 4637),
    ("A4VB", "Murach's ASP.NET 4 Web Programming with VB 2010", 5650, 3974),
    ("ADC4", "Murach's ADO.NET 4 with C# 2010", 5650, 5493),
    ("ADV4", "Murach's ADO.NET 4 with VB 2010", 5650, 4999),
    ("CRFC", "Murach's CICS Desk Reference", 5000, 1865),
    ("CS10", "Murach's C# 2010", 5650, 5136),
    ("DB1R", "DB2 for the Mainframe Programmer, Book 1", 4200, 4825),
    ("DB2R", "DB2 for the Mainframe Programmer, Book 2", 4500, 621),
    ("HTML", "Murach's HTML, XHTML, and CSS", 5450, 6141),
    ("JAV6", "Murach's Java SE 6", 5650, 3455),
    ("JSP2", "Murach's Java Servlets and JSP, 2nd Edition", 5250, 4999),
    ("MCBL", "Murach's Mainframe COBOL", 5950, 2386),
    ("MCCP", "CICS for the COBOL Programmer", 5400, 2368),
    ("SQ12", "Murach's SQL Server 2012", 5750, 2465),
    ("VB10", "Murach's Visual Basic 2010", 5650, 2193),
    ("ZJLR", "Murach's OS/390 and z/OS JCL", 6250, 677),
];

fn states() -> Vec<State> {
    STATES
        .iter()
        .map(|(code, name, _)| State {
            state_code: code.to_string(),
            state_name: name.to_string(),
        })
        .collect()
}

fn customers() -> Vec<Customer> {
    (0..CUSTOMER_COUNT)
        .map(|i| {
            // every ninth customer lives in Oregon
            let (code, _, city) = if i % 9 == 4 {
                STATES[37]
            } else {
                STATES[(i * 7) % STATES.len()]
            };
            Customer {
                customer_id: i as i32 + 1,
                name: format!(
                    "{}, {}",
                    LAST_NAMES[i % LAST_NAMES.len()],
                    FIRST_NAMES[(i / LAST_NAMES.len()) % FIRST_NAMES.len()]
                ),
                address: format!("{} {}", 100 + (i * 37) % 9800, STREETS[(i * 5) % STREETS.len()]),
                city: city.to_string(),
                state_code: code.to_string(),
                zip_code: format!("{:05}", 10_000 + (i * 131) % 89_999),
            }
        })
        .collect()
}

fn invoices() -> Result<Vec<Invoice>, DbError> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 2)
        .ok_or_else(|| DbError::DataCorruption("invalid seed start date".to_string()))?;
    let tax_rate = Decimal::new(775, 4);

    let mut invoices = Vec::new();
    for customer_id in (2..=CUSTOMER_COUNT as i32).step_by(3) {
        let lines = 1 + (customer_id % 3) as usize + (customer_id % 2) as usize;
        for line in 0..lines {
            let n = invoices.len() as i64;
            let (_, _, price, _) = PRODUCTS[(n as usize * 5) % PRODUCTS.len()];
            let quantity = 1 + (n % 4);
            let product_total = Decimal::new(price * quantity, 2);
            let sales_tax = (product_total * tax_rate).round_dp(2);
            let shipping = Decimal::new(375 + 125 * (quantity - 1), 2);
            let invoice_date = start
                .checked_add_days(Days::new((n as u64 * 3 + line as u64) % 1460))
                .ok_or_else(|| DbError::DataCorruption("invoice date overflow".to_string()))?;

            invoices.push(Invoice {
                invoice_id: n as i32 + 1,
                customer_id,
                invoice_date,
                product_total,
                sales_tax,
                shipping,
                invoice_total: product_total + sales_tax + shipping,
            });
        }
    }
    Ok(invoices)
}

fn products() -> Vec<Product> {
    PRODUCTS
        .iter()
        .map(|(code, description, cents, on_hand)| Product {
            product_code: code.to_string(),
            description: description.to_string(),
            unit_price: Decimal::new(*cents, 2),
            on_hand_quantity: *on_hand,
        })
        .collect()
}

fn accounts() -> Vec<Account> {
    let rows: [(&str, i64, Option<&str>); 10] = [
        ("Operating Cash", 1_254_075, Some("Primary checking account")),
        ("Petty Cash", 25_000, None),
        ("Accounts Receivable", 4_892_010, Some("Net 30 customers")),
        ("Inventory", 9_765_500, None),
        ("Prepaid Insurance", 180_000, Some("Renews every March")),
        ("Accounts Payable", 3_120_045, None),
        ("Sales Tax Payable", 87_530, None),
        ("Payroll Clearing", 64_200, Some("Cleared each pay period")),
        ("Shipping Supplies", 42_500, None),
        ("Marketing", 310_000, Some("Trade show deposits")),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (name, cents, notes))| Account {
            account_id: i as i32 + 1,
            name: name.to_string(),
            balance: Decimal::new(*cents, 2),
            notes: notes.map(str::to_string),
        })
        .collect()
}

fn suppliers() -> Vec<Supplier> {
    let rows: [(&str, &str, &str, &str, &str, &str); 8] = [
        ("Cascade Hops", "Nora Lindqvist", "Portland", "OR", "97201", "orders@cascadehops.example.com"),
        ("Willamette Malting", "Pete Okonkwo", "Portland", "OR", "97214", "sales@willamettemalt.example.com"),
        ("Rogue Yeast Labs", "Ida Pemberton", "Ashland", "OR", "97520", "lab@rogueyeast.example.com"),
        ("Pacific Bottle Supply", "Sam Dominguez", "Seattle", "WA", "98101", "info@pacificbottle.example.com"),
        ("Golden State Grain", "Carla Valenzuela", "Sacramento", "CA", "95814", "grain@goldenstate.example.com"),
        ("Rocky Mountain Kegs", "Hank Rasmussen", "Denver", "CO", "80202", "kegs@rmkegs.example.com"),
        ("Great Lakes Glassware", "Beth Jablonski", "Chicago", "IL", "60601", "sales@glglass.example.com"),
        ("Bayou Brewing Equipment", "Luc Thibodeaux", "New Orleans", "LA", "70112", "support@bayoubrew.example.com"),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (name, contact, city, state, zip, email))| Supplier {
            supplier_id: i as i32 + 1,
            name: name.to_string(),
            contact_name: Some(contact.to_string()),
            phone: Some(format!("555-01{:02}", i + 10)),
            email: Some(email.to_string()),
            address: Some(format!("{} {}", 200 + i * 45, STREETS[i % STREETS.len()])),
            city: Some(city.to_string()),
            state: Some(state.to_string()),
            zip: Some(zip.to_string()),
            country: Some("USA".to_string()),
            notes: (i % 3 == 0).then(|| "Preferred supplier".to_string()),
        })
        .collect()
}

fn equipment() -> Vec<Equipment> {
    let rows: [(&str, i32, f32, f32, f32); 7] = [
        ("Stovetop 5 Gal", 1, 20.0, 15.0, 10.0),
        ("Electric 10 Gal", 2, 40.0, 30.0, 8.0),
        ("Brew in a Bag 8 Gal", 1, 30.0, 22.0, 12.0),
        ("Three Vessel 15 Gal", 2, 60.0, 45.0, 6.5),
        ("All-in-One 35 L", 3, 35.0, 25.0, 9.0),
        ("Pilot System 1 BBL", 2, 120.0, 117.0, 5.0),
        ("Countertop 1 Gal", 1, 5.0, 3.8, 15.0),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (name, version, boil, batch, loss))| Equipment {
            equipment_id: i as i32 + 1,
            name: name.to_string(),
            version: Some(*version),
            boil_size: Some(*boil),
            batch_size: Some(*batch),
            trub_chiller_loss: Some(*loss),
            notes: (*version > 1).then(|| format!("Revision {}", version)),
        })
        .collect()
}

impl SeedData {
    /// Returns the built-in dataset.
    pub fn builtin() -> Result<Self, DbError> {
        Ok(Self {
            states: states(),
            accounts: accounts(),
            customers: customers(),
            invoices: invoices()?,
            products: products(),
            suppliers: suppliers(),
            equipment: equipment(),
        })
    }
}
