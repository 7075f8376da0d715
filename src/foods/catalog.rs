/// Reference entry: canonical name and energy density.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodDatabaseEntry {
    pub name: &'static str,
    pub calories_per_100g: f64,
}

/// Calories per 100g assumed for foods the database does not know.
pub const DEFAULT_CALORIES_PER_100G: f64 = 150.0;

const fn entry(name: &'static str, calories_per_100g: f64) -> FoodDatabaseEntry {
    FoodDatabaseEntry {
        name,
        calories_per_100g,
    }
}

/// Built-in table. Declared order is the matcher's iteration order.
pub static BUILTIN_FOODS: &[FoodDatabaseEntry] = &[
    // proteins
    entry("chicken breast", 165.0),
    entry("salmon", 208.0),
    entry("eggs", 155.0),
    entry("tofu", 76.0),
    entry("beef", 250.0),
    entry("pork", 242.0),
    entry("turkey", 135.0),
    entry("tuna", 130.0),
    // carbohydrates
    entry("rice", 130.0),
    entry("pasta", 131.0),
    entry("bread", 265.0),
    entry("potato", 77.0),
    entry("oats", 389.0),
    entry("quinoa", 120.0),
    // vegetables
    entry("broccoli", 34.0),
    entry("spinach", 23.0),
    entry("carrot", 41.0),
    entry("tomato", 18.0),
    entry("lettuce", 15.0),
    entry("cucumber", 16.0),
    // fruit
    entry("apple", 52.0),
    entry("banana", 89.0),
    entry("orange", 47.0),
    entry("strawberry", 32.0),
    entry("grape", 69.0),
    // dairy
    entry("milk", 42.0),
    entry("cheese", 402.0),
    entry("yogurt", 59.0),
    entry("butter", 717.0),
    // snacks and drinks
    entry("pizza", 266.0),
    entry("burger", 295.0),
    entry("chocolate", 546.0),
    entry("ice cream", 207.0),
    entry("cookie", 488.0),
    entry("chips", 536.0),
    entry("soda", 41.0),
    entry("coffee", 2.0),
    entry("tea", 1.0),
];
