//! Diesel table definitions. Must match `backend/migrations`.

diesel::table! {
    /// Salvage history, one row per salvaged item.
    salvage (item_id) {
        item_id -> Int8,
        /// Sequence value assigned on first insert; listing order.
        insertion_seq -> Int8,
        salvage_count -> Int8,
        /// Ordered JSON array of material entries.
        materials -> Jsonb,
        /// Optimistic concurrency counter, starts at 1.
        revision -> Int8,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Known materials offered on the add-salvage form.
    salvage_materials (item_id) {
        item_id -> Int8,
        name -> Text,
        image_url -> Nullable<Text>,
        created_at -> Timestamptz,
        updated_at -> Timestamptz,
    }
}
