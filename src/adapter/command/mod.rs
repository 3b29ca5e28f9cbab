mod add_stamp_handler;
mod apply_stamps_handler;
mod redeem_handler;
