//! Demo dataset: six orders across 2025-06..2025-11 and their tax summary.
//!
//! Loaded into in-memory stores so the server can run without a database
//! file and so tests have realistic data.

pub const SEED: &str = "
CREATE TABLE orders (
    order_id    INTEGER PRIMARY KEY,
    customer_id INTEGER NOT NULL,
    product_id  INTEGER NOT NULL,
    order_date  DATE    NOT NULL,   -- ISO 8601 date
    amount      REAL    NOT NULL
);

CREATE TABLE summary (
    order_id INTEGER NOT NULL REFERENCES orders(order_id),
    quantity INTEGER NOT NULL,
    discount REAL    NOT NULL DEFAULT 0,
    tax      REAL    NOT NULL DEFAULT 0
);

INSERT INTO orders (order_id, customer_id, product_id, order_date, amount) VALUES
    (1, 101, 201, '2025-06-12', 299.99),
    (2, 102, 202, '2025-07-03', 149.50),
    (3, 103, 203, '2025-08-21', 499.00),
    (4, 104, 201, '2025-09-09',  79.99),
    (5, 105, 204, '2025-10-15', 199.99),
    (6, 101, 202, '2025-11-02', 349.75);

INSERT INTO summary (order_id, quantity, discount, tax) VALUES
    (1, 2, 10.00, 15.0),
    (2, 1,  0.00,  7.5),
    (3, 3, 25.00, 28.0),
    (4, 1,  0.00, 15.0),
    (5, 2,  5.00, 24.0),
    (6, 1, 15.00,  8.5);
";
