//! End-to-end: browse, customize, fill the cart, check out, hand off.

use std::cell::RefCell;

use koibito_storefront::prelude::*;

struct CapturedLink(RefCell<Vec<String>>);

impl LinkOpener for CapturedLink {
    fn open(&self, uri: &str) {
        self.0.borrow_mut().push(uri.to_string());
    }
}

fn php(amount: i64) -> Money {
    Money::from_major(amount, Currency::PHP)
}

fn catalog() -> CatalogDocument {
    let mut ramen = MenuItem::new("tonkotsu", "Tonkotsu Ramen", php(150), "ramen");
    ramen.popular = true;
    ramen.variations = vec![
        Variation::new("regular", "Regular", php(0)),
        Variation::new("large", "Large", php(20)),
    ];
    ramen.add_ons = vec![
        AddOn::new("egg", "Ajitama Egg", php(10), "Toppings"),
        AddOn::new("chashu", "Extra Chashu", php(15), "Toppings"),
        AddOn::new("chili", "Chili Oil", php(5), "Sauces"),
    ];

    let mut siomai = MenuItem::new("siomai", "Pork Siomai", php(100), "dim-sum");
    siomai.discount_price = Some(php(90));
    siomai.discount_active = true;

    let tea = MenuItem::new("tea", "Iced Tea", php(50), "drinks");

    let mut gcash = PaymentMethod::new("gcash", "GCash");
    gcash.sort_order = 1;
    let mut maya = PaymentMethod::new("maya", "Maya");
    maya.sort_order = 2;

    CatalogDocument {
        site: SiteSettings::default(),
        categories: vec![
            Category::new("ramen", "Ramen", "🍜"),
            Category::new("dim-sum", "Dim Sum", "🥟"),
            Category::new("drinks", "Drinks", "🥤"),
        ],
        menu_items: vec![ramen, siomai, tea],
        payment_methods: vec![gcash, maya],
    }
}

#[tokio::test]
async fn test_full_order_flow() {
    let snapshot = StorefrontSnapshot::load(&StaticCatalogSource::new(catalog())).await;
    let menu = snapshot.menu();
    assert_eq!(menu.default_category().unwrap().id.as_str(), "dim-sum");

    let mut cart = Cart::default();

    // Customized ramen: large, two eggs, one chashu => 150 + 20 + 20 + 15
    let ramen = menu.item(&MenuItemId::new("tonkotsu")).unwrap();
    let mut session = match begin_add_to_cart(ramen) {
        AddToCart::Customize(session) => session,
        AddToCart::Direct(_) => panic!("ramen has options"),
    };
    session.select_variation(&VariationId::new("large")).unwrap();
    session.set_add_on_quantity(&AddOnId::new("egg"), 2).unwrap();
    session.set_add_on_quantity(&AddOnId::new("chashu"), 1).unwrap();
    assert_eq!(session.compute_price().unwrap(), php(205));
    let ramen_line = session.confirm().apply(&mut cart).unwrap();

    // Discounted siomai goes straight in, twice
    let siomai = menu.item(&MenuItemId::new("siomai")).unwrap();
    for _ in 0..2 {
        match begin_add_to_cart(siomai) {
            AddToCart::Direct(addition) => {
                addition.apply(&mut cart).unwrap();
            }
            AddToCart::Customize(_) => panic!("siomai has no options"),
        }
    }

    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.quantity_of(&MenuItemId::new("siomai")), 2);
    assert_eq!(cart.total_price().unwrap(), php(205 + 180));

    // Bump the ramen, then check out
    cart.update_quantity(&ramen_line, 2).unwrap();
    assert_eq!(cart.total_price().unwrap(), php(410 + 180));

    let mut checkout = CheckoutFlow::new(&snapshot.payment_methods.items);
    assert_eq!(checkout.payment_method.as_str(), "gcash");
    assert!(checkout.proceed_to_payment().is_err());

    checkout.details = CustomerDetails {
        name: "Aiko Santos".to_string(),
        contact_number: "09171234567".to_string(),
        address: "12 Sampaguita St, Brgy. San Jose".to_string(),
        landmark: "Blue gate".to_string(),
        delivery_area: "san-mateo".to_string(),
        delivery_time: "7:00 PM".to_string(),
        notes: String::new(),
    };
    checkout.proceed_to_payment().unwrap();
    checkout.select_payment_method("maya");

    let order = checkout
        .place_order(&cart, &snapshot.payment_methods.items, &MessengerLink::default())
        .unwrap();

    assert_eq!(order.summary.subtotal, php(590));
    assert_eq!(order.summary.delivery_fee, php(70));
    assert_eq!(order.summary.grand_total, php(660));
    // Single add-on units carry no count; the trailing x2 is the line quantity
    assert!(order
        .message
        .contains("\u{2022} Tonkotsu Ramen (Large) + Ajitama Egg x2, Extra Chashu x2 - \u{20b1}410"));
    assert!(order.message.contains("\u{2022} Pork Siomai x2 - \u{20b1}180"));
    assert!(order.message.contains("Payment: Maya"));
    assert!(order.message.contains("Landmark: Blue gate"));

    let opener = CapturedLink(RefCell::new(Vec::new()));
    order.hand_off(&opener);
    let opened = opener.0.borrow();
    assert_eq!(opened.len(), 1);
    assert!(opened[0].starts_with("https://m.me/100064992872218?text="));
    assert!(!opened[0].contains(' '));
    assert!(!opened[0].contains('\n'));
}

#[test]
fn test_merge_policy_exact_configuration_only() {
    let document = catalog();
    let ramen = &document.menu_items[0];
    let egg = ramen.add_ons[0].clone();
    let chili = ramen.add_ons[2].clone();
    let large = ramen.variations[1].clone();

    let mut cart = Cart::default();
    let a = cart
        .add_to_cart(ramen, 1, Some(&large), &[egg.clone(), chili.clone()])
        .unwrap();
    let b = cart
        .add_to_cart(ramen, 1, Some(&large), &[chili.clone(), egg.clone()])
        .unwrap();
    let c = cart
        .add_to_cart(ramen, 1, Some(&large), &[egg.clone(), egg.clone(), chili])
        .unwrap();

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(cart.items.len(), 2);
    assert_eq!(cart.get_item(&a).unwrap().quantity, 2);
    assert_eq!(cart.get_item(&c).unwrap().quantity, 1);
}

#[test]
fn test_cart_with_one_line_empties_on_zero() {
    let document = catalog();
    let mut cart = Cart::default();
    let id = cart.add_to_cart(&document.menu_items[2], 3, None, &[]).unwrap();

    cart.update_quantity(&id, 0).unwrap();
    assert!(cart.is_empty());
    assert_eq!(cart.item_count(), 0);
}
