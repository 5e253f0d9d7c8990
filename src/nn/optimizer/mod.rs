/*
 * @Author       : 老董
 * @Date         : 2026-03-02
 * @LastEditors  : 老董
 * @LastEditTime : 2026-03-02
 * @Description  : 优化器模块
 */

mod adam;

pub use adam::{Adam, AdamConfig};
