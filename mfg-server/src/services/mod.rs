//! 服务层 - 跨表的业务编排
//!
//! - [`ReservationService`] - 订单物料状态、FIFO 预留和重置

pub mod reservation;

pub use reservation::{
    MaterialRequirement, OrderReservationReport, ReservationService, ResetTally,
};
