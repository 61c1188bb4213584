mod test_relay_drops;
mod test_relay_same_room;
