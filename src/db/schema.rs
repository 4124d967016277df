//! Table definitions, applied in order at startup.
//!
//! `products` and `mainan` share one layout so the catalog repository can
//! target either table.

pub const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        nim           VARCHAR(32) UNIQUE,
        name          VARCHAR(255) NOT NULL,
        email         VARCHAR(255) NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        role          VARCHAR(16) NOT NULL DEFAULT 'user',
        photo         BYTEA,
        photo_type    VARCHAR(64),
        created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id          BIGSERIAL PRIMARY KEY,
        name        VARCHAR(255) NOT NULL,
        description TEXT,
        price       NUMERIC(10, 2) NOT NULL,
        stock       INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
        image_url   VARCHAR(512),
        image       BYTEA,
        image_type  VARCHAR(64),
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS mainan (
        id          BIGSERIAL PRIMARY KEY,
        name        VARCHAR(255) NOT NULL,
        description TEXT,
        price       NUMERIC(10, 2) NOT NULL,
        stock       INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),
        image_url   VARCHAR(512),
        image       BYTEA,
        image_type  VARCHAR(64),
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id           BIGSERIAL PRIMARY KEY,
        user_id      BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        total_amount NUMERIC(12, 2) NOT NULL,
        status       VARCHAR(16) NOT NULL DEFAULT 'pending',
        created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS order_items (
        id         BIGSERIAL PRIMARY KEY,
        order_id   BIGINT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
        product_id BIGINT NOT NULL REFERENCES products(id),
        quantity   INTEGER NOT NULL CHECK (quantity > 0),
        price      NUMERIC(10, 2) NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_orders_user_id ON orders(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_order_items_order_id ON order_items(order_id)",
    r#"
    CREATE TABLE IF NOT EXISTS pesanan (
        id          BIGSERIAL PRIMARY KEY,
        user_id     BIGINT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        mainan_id   BIGINT NOT NULL REFERENCES mainan(id) ON DELETE CASCADE,
        quantity    INTEGER NOT NULL CHECK (quantity > 0),
        total_price NUMERIC(12, 2) NOT NULL,
        status      VARCHAR(16) NOT NULL DEFAULT 'pending',
        order_date  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_pesanan_user_id ON pesanan(user_id)",
];
