//! GraphQL documents for the reserves API.

/// Every field of a reserve, nested sequences included.
macro_rules! reserve_fields {
    () => {
        "
        id
        name
        type
        label
        description
        bonuses { id val }
        deployables { name type size detail }
        actions {
          name
          activation
          detail
          range { type val }
          damage { type val }
        }
        synergies { locations detail }
        createdAt
        updatedAt
        "
    };
}

/// Scalar fields only.
macro_rules! reserve_summary_fields {
    () => {
        "
        id
        name
        type
        label
        description
        createdAt
        updatedAt
        "
    };
}

pub const RESERVES: &str = concat!(
    "query Reserves($type: ReserveTypeEnum, $skip: Int, $limit: Int) {\n",
    "  reserves(type: $type, skip: $skip, limit: $limit) {",
    reserve_fields!(),
    "}\n}\n"
);

pub const RESERVE_BY_ID: &str = concat!(
    "query Reserve($id: String!) {\n",
    "  reserve(id: $id) {",
    reserve_fields!(),
    "}\n}\n"
);

pub const RANDOM_RESERVES: &str = concat!(
    "query RandomReserves($count: Int!, $type: ReserveTypeEnum) {\n",
    "  randomReserves(count: $count, type: $type) {",
    reserve_summary_fields!(),
    "}\n}\n"
);

pub const RESERVES_BY_LABEL: &str = concat!(
    "query ReservesByLabel($label: String!) {\n",
    "  reservesByLabel(label: $label) {",
    reserve_summary_fields!(),
    "}\n}\n"
);

pub const CREATE_RESERVE: &str = concat!(
    "mutation CreateReserve($input: ReserveInput!) {\n",
    "  createReserve(input: $input) {",
    reserve_fields!(),
    "}\n}\n"
);

pub const UPDATE_RESERVE: &str = concat!(
    "mutation UpdateReserve($id: String!, $input: ReserveUpdateInput!) {\n",
    "  updateReserve(id: $id, input: $input) {",
    reserve_fields!(),
    "}\n}\n"
);

pub const DELETE_RESERVE: &str = "mutation DeleteReserve($id: String!) {\n  deleteReserve(id: $id)\n}\n";

pub const IMPORT_RESERVES: &str = concat!(
    "mutation ImportReserves($reserves: [ReserveInput!]!) {\n",
    "  importReserves(reserves: $reserves) {",
    reserve_fields!(),
    "}\n}\n"
);
